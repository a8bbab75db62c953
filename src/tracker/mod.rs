mod object_tracker;
mod part_init;
#[cfg(test)]
mod tests;
mod tracking_policy;

pub use object_tracker::ObjectTracker;
pub use tracking_policy::TrackingPolicy;
