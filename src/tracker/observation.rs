/// Instantaneous kinematics derived from two consecutive sightings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    /// Speed in the configured display unit
    pub speed: f64,
    /// Change of speed per second, in display units per second
    pub acceleration: f64,
    /// Distance covered since the previous sighting, in calibrated base units
    pub distance: f64,
}

/// Result of feeding one sighting to the track table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observation {
    /// First sighting of an id; nothing to derive yet
    Created,
    /// Timestamp did not advance; position refreshed, kinematics untouched
    Stale,
    /// Kinematics updated from the previous sighting
    Moved(Kinematics),
}

impl Observation {
    pub fn kinematics(&self) -> Option<&Kinematics> {
        match self {
            Self::Moved(k) => Some(k),
            _ => None,
        }
    }
}
