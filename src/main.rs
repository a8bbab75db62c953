#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]

use flight_data_core::flight_data::PartFlightData;
use flight_data_core::host::sim::{SimFailure, SimFlightCore, SimPart, SimUniverse, SimVessel};
use flight_data_core::host::{FailureModule, FlightCore, Part, PartId, Universe, Vessel, VesselId, VesselType};
use flight_data_core::manager::FlightManager;
use flight_data_core::scenario::{FlightDataScenario, ScenarioSlot};
use flight_data_core::{error, info, log, warn};
use itertools::Itertools;
use rand::Rng;
use std::{env, time::Duration};

const TICK: Duration = Duration::from_millis(50);
const SIM_STEP: f64 = 2.0;
const TICKS: usize = 60;
const SUMMARY_EVERY: usize = 20;
/// Tick at which the rover is lost, leaving its rows to the reconciler.
const ROVER_LOSS_TICK: usize = 35;
const FAILURE_CHANCE: f64 = 0.01;
const REPAIR_CHANCE: f64 = 0.1;
const FAILURES: [&str; 4] = ["Ignition Failure", "Engine Shutdown", "Fuel Leak", "Stuck Gimbal"];

const ROVER_ID: u128 = 3;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let checkpoint_var = env::var("TF_CHECKPOINT");
    let checkpoint = checkpoint_var.as_ref().map_or("./flight_data.bin", |v| v.as_str()).to_string();

    let (slot, ready) = ScenarioSlot::new();
    let loader = tokio::spawn({
        let path = checkpoint.clone();
        async move {
            let mut scenario = FlightDataScenario::load_checkpoint(&path).await.unwrap_or_else(|e| {
                error!("Could not restore checkpoint {path}: {e}");
                FlightDataScenario::default()
            });
            scenario.settings_mut().apply_overrides(|var| env::var(var).ok());
            slot.start(scenario);
        }
    });

    let mut manager = FlightManager::connect(ready).await;
    if let Err(e) = loader.await {
        error!("Scenario loader failed: {e}");
    }
    let settings = manager.scenario().read().await.settings().clone();
    info!("Tracking with {settings:?}");

    let mut universe = build_universe();
    let mut rng = rand::rng();
    let mut interval = tokio::time::interval(TICK);
    for tick in 1..=TICKS {
        interval.tick().await;
        universe.advance(SIM_STEP);
        inject_failures(&mut universe, &mut rng);
        if tick == ROVER_LOSS_TICK && universe.remove_vessel(VesselId(ROVER_ID)).is_some() {
            warn!("Lost contact with rover at {}s", universe.universal_time());
        }

        let report = manager.update(&mut universe).await;
        for id in &report.admitted {
            if let Some(vessel) = universe.vessel(*id) {
                info!("Tracking {} ({})", vessel.name(), vessel.vessel_type());
            }
        }
        if let Some(reconciled) = report.reconciled.filter(|r| !r.is_noop()) {
            log!(
                "Reconciled master status: {} vessels and {} parts removed",
                reconciled.vessels_removed,
                reconciled.parts_removed
            );
        }
        if report.anomalies > 0 {
            warn!("Coalesced {} duplicate part rows", report.anomalies);
        }
        if tick % SUMMARY_EVERY == 0 {
            log_summary(&manager);
        }
    }

    let handle = std::sync::Arc::clone(manager.scenario());
    let mut scenario = handle.write().await;
    if let Err(e) = scenario.save_checkpoint(&checkpoint).await {
        error!("Could not write checkpoint {checkpoint}: {e}");
    }
    scenario.store().iter().map(PartFlightData::to_packed).sorted().for_each(|packed| log!("{packed}"));
}

fn build_universe() -> SimUniverse {
    let mut universe = SimUniverse::new();
    let ship = universe.add_vessel(
        SimVessel::new(1, "Kerbal X", VesselType::Ship)
            .with_part(SimPart::new(1, "mk1pod", "Mk1 Command Pod").with_core(SimFlightCore::new("Atmosphere")))
            .with_part(SimPart::new(2, "liquidEngine", "LV-T30 Engine").with_core(SimFlightCore::new("Atmosphere")))
            .with_part(SimPart::new(3, "fuelTank", "FL-T400 Fuel Tank"))
            .with_part(SimPart::new(4, "liquidEngine", "LV-T30 Engine").with_core(SimFlightCore::new("Atmosphere"))),
    );
    universe.add_vessel(
        SimVessel::new(2, "Relay Probe", VesselType::Relay)
            .with_part(SimPart::new(1, "probeCore", "Probodobodyne OKTO").with_core(SimFlightCore::new("Space"))),
    );
    universe.add_vessel(
        SimVessel::new(ROVER_ID, "Duna Rover", VesselType::Rover)
            .with_part(SimPart::new(1, "probeCore", "Probodobodyne OKTO").with_core(SimFlightCore::new("Surface")))
            .with_part(SimPart::new(2, "roverWheel", "RoveMax M1").with_core(SimFlightCore::new("Surface"))),
    );
    universe.add_vessel(
        SimVessel::new(4, "Kerbal X Debris", VesselType::Debris)
            .with_part(SimPart::new(1, "liquidEngine", "LV-T30 Engine").with_core(SimFlightCore::new("Space"))),
    );
    universe.set_active(Some(ship));
    universe
}

/// Randomly breaks nominal cores and repairs failed ones.
fn inject_failures<R: Rng>(universe: &mut SimUniverse, rng: &mut R) {
    let vessel_ids: Vec<VesselId> = universe.vessels().iter().map(|v| v.id()).collect();
    for vessel_id in vessel_ids {
        let Some(vessel) = universe.sim_vessel_mut(vessel_id) else { continue };
        let part_ids: Vec<PartId> = vessel.sim_parts().iter().map(Part::flight_id).collect();
        for part_id in part_ids {
            let Some(core) = vessel.part_mut(part_id).and_then(|p| p.core_mut(0)) else { continue };
            if core.part_status() > 0 {
                if rng.random_bool(REPAIR_CHANCE) {
                    core.repair();
                }
            } else if rng.random_bool(FAILURE_CHANCE) {
                let title = FAILURES[rng.random_range(0..FAILURES.len())];
                core.fail(rng.random_range(1..=3), SimFailure::new(title, rng.random_bool(0.3)));
            }
        }
    }
}

fn log_summary(manager: &FlightManager) {
    for item in manager.master_status().iter().sorted_by_key(|item| item.vessel_id) {
        let failed = item.all_parts_status.iter().filter(|p| p.has_failure()).count();
        info!("{}: {} parts, {failed} failed", item.vessel_name, item.all_parts_status.len());
        for part in &item.all_parts_status {
            let failure = part.active_failure.as_ref().and_then(std::sync::Weak::upgrade);
            match failure {
                Some(f) => warn!(
                    "  {} [{}]: {} ({})",
                    part.part_name,
                    part.part_id,
                    f.failure_title(),
                    part.repair_requirements
                ),
                None => log!(
                    "  {} [{}]: {:.0} data, {:.1}% reliable",
                    part.part_name,
                    part.part_id,
                    part.flight_data,
                    part.reliability * 100.0
                ),
            }
        }
    }
}
