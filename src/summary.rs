use {
    crate::parameters::Parameters,
    std::fmt::{self, Display},
};

/// Width of the value column
const WIDTH: usize = 13;

/// Human-readable overview of the main simulation parameters
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a>(&'a Parameters);

impl Parameters {
    pub fn summary(&self) -> Summary<'_> {
        Summary(self)
    }
}

impl Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.0;

        writeln!(f, "Simulation parameters:")?;
        writeln!(f, "  Grid Length = {:<w$}", p.grid.length(), w = WIDTH)?;
        writeln!(f, "  End Time = {:<w$}", p.time.simulation_time, w = WIDTH)?;
        writeln!(f)?;

        writeln!(f, "Initial condition:")?;
        writeln!(f, "  Ekin = {:<w$}", p.initial.kinetic_energy, w = WIDTH)?;
        writeln!(f, "  Emag = {:<w$}", p.initial.magnetic_energy, w = WIDTH)?;
        writeln!(f)?;

        writeln!(f, "Equation coefficients:")?;
        writeln!(f, "  nu = {:<w$}", p.physics.viscosity, w = WIDTH)?;
        writeln!(f, "  eta = {:<w$}", p.physics.resistivity, w = WIDTH)?;
        writeln!(f)
    }
}
