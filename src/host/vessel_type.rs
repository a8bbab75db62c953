use strum_macros::{Display, EnumIter, EnumString};

/// Category tag the host assigns to every vessel.
#[derive(
    serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum VesselType {
    Debris,
    SpaceObject,
    Unknown,
    Probe,
    Relay,
    Rover,
    Lander,
    Ship,
    Plane,
    Station,
    Base,
    #[strum(serialize = "EVA")]
    Eva,
    Flag,
}

impl VesselType {
    /// Whether vessels of this category are tracked when every vessel is processed.
    pub fn is_trackable(self) -> bool {
        matches!(
            self,
            VesselType::Lander | VesselType::Probe | VesselType::Rover | VesselType::Ship | VesselType::Station
        )
    }

    pub fn is_debris(self) -> bool { self == VesselType::Debris }
}
