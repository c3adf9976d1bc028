#[macro_use]
extern crate clap;

use {
    anyhow::{bail, Result},
    log::error,
    mhd_config::parameters::Parameters,
    simplelog::{Config as LogConfig, LevelFilter, TermLogger, TerminalMode},
    std::{fs::create_dir_all, path::Path},
};

#[quit::main]
fn main() {
    let matches = clap_app!(mhd_config =>
        (version: crate_version!())
        (about: "Resolves MHD simulation parameters against their defaults.")
        (@arg PARAMETERS: -p --parameters +takes_value +required "Path to file containing simulation parameters.")
        (@arg VERBOSE: -v --verbose "Log where every parameter was resolved from.")
        (@subcommand summary =>
            (about: "Prints a summary of the main simulation parameters (default).")
        )
        (@subcommand save =>
            (about: "Writes the persisted subset of the parameters to params.yaml.")
            (@arg OUTPUT: -o --output +takes_value +required "Directory to write params.yaml into, created if missing.")
        )
        (@subcommand dump =>
            (about: "Prints every resolved parameter, including derived ones, as YAML.")
        )
    )
    .get_matches();

    let level = if matches.is_present("VERBOSE") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    TermLogger::init(level, LogConfig::default(), TerminalMode::Mixed)
        .expect("Failed to initialize logger");

    let params = {
        // Should never panic as clap should return an error if the argument was not supplied
        let path = matches
            .value_of("PARAMETERS")
            .expect("Path to parameters file not supplied");

        Parameters::from_path(path).unwrap_or_else(|e| {
            error!("{}", e);
            quit::with_code(1);
        })
    };

    let output = matches
        .subcommand_matches("save")
        .and_then(|m| m.value_of("OUTPUT"));

    run_subcommand(matches.subcommand_name(), output, &params).unwrap_or_else(|e| {
        error!("Error: \"{}\"", e);
        quit::with_code(1);
    });
}

fn run_subcommand(subcmd: Option<&str>, output: Option<&str>, params: &Parameters) -> Result<()> {
    match subcmd.unwrap_or("summary") {
        "summary" => print!("{}", params.summary()),
        "save" => {
            let dir = match output {
                Some(dir) => Path::new(dir),
                None => bail!("No output directory supplied"),
            };

            create_dir_all(dir)?;
            params.save(dir)?;
        }
        "dump" => print!("{}", serde_yaml::to_string(params)?),
        _ => {
            // Should be unreachable due to clap catching this error
            bail!("Unrecognized subcommand");
        }
    }

    Ok(())
}
