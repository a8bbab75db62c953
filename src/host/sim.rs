//! In-memory host simulation used by the demo binary and the tests.

use super::{FailureModule, FlightCore, Part, PartId, Universe, Vessel, VesselId, VesselType};
use crate::flight_data::FlightDataRecord;
use std::sync::{Arc, Weak};

#[derive(Debug)]
pub struct SimFailure {
    title: String,
    major: bool,
}

impl SimFailure {
    pub fn new(title: impl Into<String>, major: bool) -> Self { Self { title: title.into(), major } }
}

impl FailureModule for SimFailure {
    fn failure_title(&self) -> &str { &self.title }
    fn is_major(&self) -> bool { self.major }
}

/// A toy reliability model: flight data grows with powered flight time and reliability grows
/// with flight data.
#[derive(Debug, Clone)]
pub struct SimFlightCore {
    scope: String,
    flight_data: f64,
    flight_time: f64,
    status: i32,
    acknowledged: bool,
    failure: Option<Arc<SimFailure>>,
    history: Vec<FlightDataRecord>,
    init_count: usize,
}

impl SimFlightCore {
    /// Flight data needed for a reliability of 75% before the modifier is applied.
    const DATA_HALF_LIFE: f64 = 1000.0;

    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            flight_data: 0.0,
            flight_time: 0.0,
            status: 0,
            acknowledged: false,
            failure: None,
            history: Vec::new(),
            init_count: 0,
        }
    }

    /// Number of `initialize_flight_data` calls received.
    pub fn init_count(&self) -> usize { self.init_count }
    pub fn history(&self) -> &[FlightDataRecord] { &self.history }

    pub fn set_scope(&mut self, scope: impl Into<String>) {
        self.scope = scope.into();
        self.flight_data = self.history.iter().find(|r| r.scope() == self.scope).map_or(0.0, FlightDataRecord::flight_data);
    }

    pub fn advance(&mut self, dt: f64) {
        self.flight_time += dt;
        if self.status == 0 {
            self.flight_data += dt;
        }
    }

    pub fn fail(&mut self, code: i32, failure: SimFailure) {
        self.status = code.max(1);
        self.acknowledged = false;
        self.failure = Some(Arc::new(failure));
    }

    pub fn acknowledge(&mut self) { self.acknowledged = true; }

    pub fn repair(&mut self) {
        self.status = 0;
        self.failure = None;
    }
}

impl FlightCore for SimFlightCore {
    fn initialize_flight_data(&mut self, flight_data: &[FlightDataRecord], _reliability_modifier: f64) {
        self.init_count += 1;
        self.history = flight_data.to_vec();
        self.flight_data = self
            .history
            .iter()
            .find(|r| r.scope() == self.scope)
            .map_or(self.flight_data, FlightDataRecord::flight_data);
    }

    fn scope(&self) -> String { self.scope.clone() }
    fn flight_data(&self) -> f64 { self.flight_data }
    fn flight_time(&self) -> f64 { self.flight_time }
    fn part_status(&self) -> i32 { self.status }

    fn current_reliability(&self, reliability_modifier: f64) -> f64 {
        let base = 0.5 + 0.5 * self.flight_data / (self.flight_data + Self::DATA_HALF_LIFE);
        (base * reliability_modifier).clamp(0.0, 1.0)
    }

    fn requirements_tooltip(&self) -> String {
        match &self.failure {
            Some(f) if f.is_major() => String::from("Requires an engineer and 2 spare parts"),
            Some(_) => String::from("Requires 1 spare part"),
            None => String::new(),
        }
    }

    fn is_failure_acknowledged(&self) -> bool { self.acknowledged }

    fn failure_module(&self) -> Option<Weak<dyn FailureModule>> {
        self.failure.as_ref().map(|f| {
            let failure: Arc<dyn FailureModule> = Arc::clone(f) as Arc<dyn FailureModule>;
            Arc::downgrade(&failure)
        })
    }
}

#[derive(Debug, Clone)]
pub struct SimPart {
    flight_id: PartId,
    name: String,
    title: String,
    cores: Vec<SimFlightCore>,
}

impl SimPart {
    pub fn new(flight_id: u32, name: impl Into<String>, title: impl Into<String>) -> Self {
        Self { flight_id: PartId(flight_id), name: name.into(), title: title.into(), cores: Vec::new() }
    }

    #[must_use]
    pub fn with_core(mut self, core: SimFlightCore) -> Self {
        self.cores.push(core);
        self
    }

    pub fn core(&self, i: usize) -> Option<&SimFlightCore> { self.cores.get(i) }
    pub fn core_mut(&mut self, i: usize) -> Option<&mut SimFlightCore> { self.cores.get_mut(i) }
}

impl Part for SimPart {
    fn flight_id(&self) -> PartId { self.flight_id }
    fn name(&self) -> &str { &self.name }
    fn title(&self) -> &str { &self.title }

    fn flight_cores(&self) -> Vec<&dyn FlightCore> {
        self.cores.iter().map(|c| c as &dyn FlightCore).collect()
    }

    fn flight_cores_mut(&mut self) -> Vec<&mut dyn FlightCore> {
        self.cores.iter_mut().map(|c| c as &mut dyn FlightCore).collect()
    }
}

#[derive(Debug, Clone)]
pub struct SimVessel {
    id: VesselId,
    name: String,
    vessel_type: VesselType,
    loaded: bool,
    parts: Vec<SimPart>,
}

impl SimVessel {
    pub fn new(id: u128, name: impl Into<String>, vessel_type: VesselType) -> Self {
        Self { id: VesselId(id), name: name.into(), vessel_type, loaded: true, parts: Vec::new() }
    }

    #[must_use]
    pub fn with_part(mut self, part: SimPart) -> Self {
        self.parts.push(part);
        self
    }

    pub fn set_type(&mut self, vessel_type: VesselType) { self.vessel_type = vessel_type; }
    pub fn set_loaded(&mut self, loaded: bool) { self.loaded = loaded; }
    pub fn add_part(&mut self, part: SimPart) { self.parts.push(part); }

    pub fn remove_part(&mut self, id: PartId) -> Option<SimPart> {
        let i = self.parts.iter().position(|p| p.flight_id == id)?;
        Some(self.parts.remove(i))
    }

    pub fn part(&self, id: PartId) -> Option<&SimPart> { self.parts.iter().find(|p| p.flight_id == id) }

    pub fn part_mut(&mut self, id: PartId) -> Option<&mut SimPart> {
        self.parts.iter_mut().find(|p| p.flight_id == id)
    }

    pub fn sim_parts(&self) -> &[SimPart] { &self.parts }

    fn advance(&mut self, dt: f64) {
        self.parts.iter_mut().flat_map(|p| p.cores.iter_mut()).for_each(|c| c.advance(dt));
    }
}

impl Vessel for SimVessel {
    fn id(&self) -> VesselId { self.id }
    fn name(&self) -> &str { &self.name }
    fn vessel_type(&self) -> VesselType { self.vessel_type }
    fn is_loaded(&self) -> bool { self.loaded }
    fn parts(&self) -> Vec<&dyn Part> { self.parts.iter().map(|p| p as &dyn Part).collect() }

    fn parts_mut(&mut self) -> Vec<&mut dyn Part> {
        self.parts.iter_mut().map(|p| p as &mut dyn Part).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimUniverse {
    time: f64,
    active: Option<VesselId>,
    vessels: Vec<SimVessel>,
}

impl SimUniverse {
    pub fn new() -> Self { Self::default() }

    pub fn add_vessel(&mut self, vessel: SimVessel) -> VesselId {
        let id = vessel.id;
        self.vessels.push(vessel);
        id
    }

    pub fn remove_vessel(&mut self, id: VesselId) -> Option<SimVessel> {
        let i = self.vessels.iter().position(|v| v.id == id)?;
        if self.active == Some(id) {
            self.active = None;
        }
        Some(self.vessels.remove(i))
    }

    pub fn set_active(&mut self, id: Option<VesselId>) { self.active = id; }
    pub fn set_time(&mut self, time: f64) { self.time = time; }

    pub fn sim_vessel(&self, id: VesselId) -> Option<&SimVessel> { self.vessels.iter().find(|v| v.id == id) }

    pub fn sim_vessel_mut(&mut self, id: VesselId) -> Option<&mut SimVessel> {
        self.vessels.iter_mut().find(|v| v.id == id)
    }

    /// Moves the clock forward and accumulates flight data on every loaded vessel.
    pub fn advance(&mut self, dt: f64) {
        self.time += dt;
        self.vessels.iter_mut().filter(|v| v.loaded).for_each(|v| v.advance(dt));
    }
}

impl Universe for SimUniverse {
    fn universal_time(&self) -> f64 { self.time }
    fn active_vessel(&self) -> Option<VesselId> { self.active }
    fn vessels(&self) -> Vec<&dyn Vessel> { self.vessels.iter().map(|v| v as &dyn Vessel).collect() }

    fn vessel_mut(&mut self, id: VesselId) -> Option<&mut dyn Vessel> {
        self.vessels.iter_mut().find(|v| v.id == id).map(|v| v as &mut dyn Vessel)
    }
}
