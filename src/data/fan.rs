use measurements::AngularVelocity;

#[derive(Debug, Clone, PartialEq)]
pub struct FanData {
    /// The position or index of the fan as seen by the device
    /// Usually dependent on where the fan is connected to the control board
    pub position: i16,
    /// The RPM of the fan, if the device reports it
    pub rpm: Option<AngularVelocity>,
}

impl FanData {
    pub fn new(position: i16, rpm: f64) -> Self {
        Self {
            position,
            rpm: Some(AngularVelocity::from_rpm(rpm)),
        }
    }
}
