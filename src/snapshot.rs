use {
    crate::{
        error::{Error, Result},
        parameters::Parameters,
    },
    log::info,
    serde::{Deserialize, Serialize},
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

/// Name of the snapshot file written into the output directory
pub const PARAMS_FILE_NAME: &str = "params.yaml";

/// Persisted subset of the resolved parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "gridLength")]
    pub grid_length: usize,
    #[serde(rename = "time")]
    pub simulation_time: f64,
    #[serde(rename = "Ekin0")]
    pub kinetic_energy: f64,
    #[serde(rename = "Emag0")]
    pub magnetic_energy: f64,
    #[serde(rename = "nu")]
    pub viscosity: f64,
    #[serde(rename = "eta")]
    pub resistivity: f64,
    #[serde(rename = "outStep")]
    pub output_step: f64,
    #[serde(rename = "outStart")]
    pub output_start: f64,
    #[serde(rename = "outStop")]
    pub output_stop: f64,
}

impl From<&Parameters> for Snapshot {
    fn from(params: &Parameters) -> Self {
        Snapshot {
            grid_length: params.grid.length(),
            simulation_time: params.time.simulation_time,
            kinetic_energy: params.initial.kinetic_energy,
            magnetic_energy: params.initial.magnetic_energy,
            viscosity: params.physics.viscosity,
            resistivity: params.physics.resistivity,
            output_step: params.output.step,
            output_start: params.output.start,
            output_stop: params.output.stop,
        }
    }
}

impl Snapshot {
    /// Reads a snapshot previously written by `Parameters::save`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source_error = |reason: String| Error::Source {
            origin: path.display().to_string(),
            reason,
        };

        let text = fs::read_to_string(path).map_err(|e| source_error(e.to_string()))?;
        serde_yaml::from_str(&text).map_err(|e| source_error(e.to_string()))
    }

    /// One `key: value` line per field
    pub fn to_yaml(&self) -> Result<String> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(yaml.trim_start_matches("---\n").to_owned())
    }
}

impl Parameters {
    /// Writes the snapshot to `params.yaml` inside `directory`, replacing any
    /// existing file, and returns the path written.
    pub fn save<P: AsRef<Path>>(&self, directory: P) -> Result<PathBuf> {
        let path = directory.as_ref().join(PARAMS_FILE_NAME);
        let yaml = Snapshot::from(self).to_yaml()?;

        fs::write(&path, yaml).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;

        info!("Saved parameters to \"{}\"", path.display());

        Ok(path)
    }
}

#[cfg(test)]
mod test {
    use {super::*, serde_yaml::Value, tempdir::TempDir};

    const KEYS: [&str; 9] = [
        "gridLength",
        "time",
        "Ekin0",
        "Emag0",
        "nu",
        "eta",
        "outStep",
        "outStart",
        "outStop",
    ];

    #[test]
    fn one_line_per_field() {
        let params = "".parse::<Parameters>().unwrap();
        let yaml = Snapshot::from(&params).to_yaml().unwrap();

        let keys = yaml
            .lines()
            .map(|line| line.split(':').next().unwrap())
            .collect::<Vec<_>>();

        assert_eq!(keys, KEYS);
    }

    #[test]
    fn save_overwrites() {
        let dir = TempDir::new("mhd-config").unwrap();
        let path = dir.path().join(PARAMS_FILE_NAME);
        fs::write(&path, "stale: true\nmore: stale\n").unwrap();

        let params = "GridLength: 64".parse::<Parameters>().unwrap();
        assert_eq!(params.save(dir.path()).unwrap(), path);

        let written = serde_yaml::from_str::<Value>(&fs::read_to_string(&path).unwrap()).unwrap();
        let mapping = written.as_mapping().unwrap();

        assert_eq!(mapping.len(), KEYS.len());
        assert!(mapping.get(&Value::from("stale")).is_none());
        assert_eq!(mapping.get(&Value::from("gridLength")), Some(&Value::from(64)));
    }

    #[test]
    fn save_to_missing_directory() {
        let dir = TempDir::new("mhd-config").unwrap();
        let missing = dir.path().join("missing");

        let params = "".parse::<Parameters>().unwrap();
        match params.save(&missing) {
            Err(Error::Write { path, .. }) => assert_eq!(path, missing.join(PARAMS_FILE_NAME)),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn load_missing_snapshot() {
        assert!(matches!(
            Snapshot::load("src/testdata/no_such_params.yaml"),
            Err(Error::Source { .. })
        ));
    }
}
