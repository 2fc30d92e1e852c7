/// delayed travel times across a link, in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveThroughTimes {
    pub rush_hour: f64,
    pub midday: f64,
    pub all_day: f64,
}

impl DriveThroughTimes {
    pub fn uniform(minutes: f64) -> DriveThroughTimes {
        DriveThroughTimes {
            rush_hour: minutes,
            midday: minutes,
            all_day: minutes,
        }
    }
}
