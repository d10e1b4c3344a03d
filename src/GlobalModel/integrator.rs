//! # Integrator Module
//!
//! ## Purpose
//! The explicit time-stepping scheduler of the global model: the two-phase
//! main loop (plasma pulse, then field-free afterglow), the Gaussian
//! electron-temperature profile, the decade-keyed sample interval policy and
//! cooperative cancellation.
//!
//! ## Key Logic Implementation
//! 1. **Pulse phase**: while `t < total_time` and `t < 10 * plasma_time`,
//!    each step recomputes the electron temperature, refreshes all rate
//!    constants, evaluates the balance and applies the explicit update
//! 2. **Afterglow phase**: one final rate refresh at the boundary electron
//!    temperature, then the same stepping with rate constants frozen. The
//!    electron temperature has decayed to the gas temperature by then, and
//!    the gas temperature is treated as constant for the whole run, so the
//!    remaining neutral/ion rates need no per-step refresh
//! 3. **Sample policy**: a sample is emitted when
//!    `step_count % save_interval == 0` and the simulation time is beyond
//!    the last persisted instant; the interval follows the decade of the
//!    simulation time, rescaled to the actual step size, so the sampling
//!    density stays roughly constant across decades

use super::model::{GlobalModel, ModelError, SimulationPhase};
use super::sampling::{SampleRow, SampleWriter};
use log::info;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;

/// Step size the save-interval table is calibrated for.
pub const REFERENCE_DT: f64 = 50e-12;

/// Cancellation flag and optional in-process sample monitor handed to the
/// main loop. The defaults run to completion unobserved.
#[derive(Default)]
pub struct RunControl {
    pub cancel: Option<Arc<AtomicBool>>,
    pub monitor: Option<Sender<SampleRow>>,
}

impl RunControl {
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }
}

impl GlobalModel {
    /// Electron temperature at the current simulation time: during the
    /// pulse window a Gaussian centered at `5 * plasma_time` with width
    /// `plasma_time`, rising from the gas temperature to the peak value and
    /// decaying back; outside the window the gas temperature itself.
    pub fn electron_temperature_at_time(&self) -> f64 {
        let mut temperature_value = self.gas_temperature;
        if self.simulation_time < 10.0 * self.plasma_time {
            let argument = (self.simulation_time - 5.0 * self.plasma_time) / self.plasma_time;
            temperature_value = self.gas_temperature
                + (self.peak_electron_temperature - self.gas_temperature)
                    * f64::exp(-0.5 * argument * argument);
        }
        temperature_value
    }

    /// Steps between persisted samples for the current decade of simulation
    /// time, rescaled from the reference step size to the actual `dt`.
    /// Never below 1.
    pub fn save_interval_step(&self) -> u64 {
        let mut result: f64 = 1.0;
        if self.simulation_time <= 1e3 {
            result = 1e12;
        }
        if self.simulation_time <= 1e2 {
            result = 1e11;
        }
        if self.simulation_time <= 1e1 {
            result = 1e10;
        }
        if self.simulation_time <= 1e0 {
            result = 1e9;
        }
        if self.simulation_time <= 1e-1 {
            result = 1e8;
        }
        if self.simulation_time <= 1e-2 {
            result = 1e7;
        }
        if self.simulation_time <= 1e-3 {
            result = 1e6;
        }
        if self.simulation_time <= 1e-4 {
            result = 1e5;
        }
        if self.simulation_time <= 1e-5 {
            result = 1e4;
        }
        if self.simulation_time <= 1e-6 {
            result = 1e3;
        }
        if self.simulation_time <= 1e-7 {
            result = 1e2;
        }
        if self.simulation_time <= 1e-8 {
            result = 1e1;
        }
        if self.simulation_time <= 1e-9 {
            result = 1.0;
        }

        let ratio_factor = self.dt / REFERENCE_DT;
        let interval = (result / ratio_factor).floor() as u64;
        interval.max(1)
    }

    /// Run the full simulation: pulse phase, afterglow phase, appending
    /// samples to the stream at `output_path`. Cancellation is checked at
    /// the top of every iteration, so an early exit never leaves a step
    /// half-applied.
    pub fn process_main_loop(
        &mut self,
        output_path: &Path,
        control: &RunControl,
    ) -> Result<(), ModelError> {
        let mut writer = SampleWriter::open_append(output_path)?;
        if self.simulation_time == 0.0 {
            writer.write_header(&self.species)?;
        }

        self.phase = SimulationPhase::Pulse;
        info!("PLASMA PULSE (duration = {} s)", self.plasma_time);
        while self.simulation_time < self.total_time
            && self.simulation_time < 10.0 * self.plasma_time
        {
            if control.is_cancelled() {
                info!("cancelled at step {}", self.step_count);
                return Ok(());
            }
            self.electron_temperature = self.electron_temperature_at_time();
            self.set_reaction_rates();
            self.process_balance_equations();
            self.process_time_step_species_densities();
            self.maybe_write_sample(&mut writer, control)?;
            self.simulation_time += self.dt;
            self.step_count += 1;
        }

        // one refresh at the boundary temperature; rate constants then stay
        // frozen for the rest of the run
        self.electron_temperature = self.electron_temperature_at_time();
        self.set_reaction_rates();

        self.phase = SimulationPhase::Afterglow;
        info!("AFTERGLOW");
        while self.simulation_time < self.total_time {
            if control.is_cancelled() {
                info!("cancelled at step {}", self.step_count);
                return Ok(());
            }
            self.process_balance_equations();
            self.process_time_step_species_densities();
            self.maybe_write_sample(&mut writer, control)?;
            self.simulation_time += self.dt;
            self.step_count += 1;
        }

        self.phase = SimulationPhase::Finished;
        info!(
            "finished at t = {} s after {} steps",
            self.simulation_time, self.step_count
        );
        Ok(())
    }

    fn maybe_write_sample(
        &mut self,
        writer: &mut SampleWriter,
        control: &RunControl,
    ) -> Result<(), ModelError> {
        if self.step_count % self.save_interval_step() == 0
            && self.simulation_time > self.last_saved_simulation_time
        {
            let row = self.sample_row();
            writer.write_row(&row)?;
            self.last_saved_simulation_time = self.simulation_time;
            println!(
                "{}\t{}\t{}",
                self.simulation_time, self.step_count, self.electron_temperature
            );
            if let Some(monitor) = &control.monitor {
                // a detached monitor is not an error, the stream file stays
                // authoritative
                monitor.send(row).ok();
            }
        }
        Ok(())
    }
}
