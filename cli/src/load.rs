use anyhow::{Result, anyhow};
use log::{debug, info, trace};
use pit_engine::Schedule;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn load_schedule(path: Option<&Path>) -> Result<Schedule> {
    let Some(path) = path else {
        debug!("Using the statutory schedule");
        return Ok(Schedule::default());
    };

    info!("Loading schedule from {}", path.display());
    let file =
        File::open(path).map_err(|e| anyhow!("Failed to open {}: {e}", path.display()))?;
    let schedule: Schedule = serde_json::from_reader(BufReader::new(file))?;
    trace!("Schedule: {schedule:?}");

    schedule
        .validate()
        .map_err(|e| anyhow!("Invalid schedule in {}: {e}", path.display()))?;
    Ok(schedule)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    fn data_file(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
    }

    #[test]
    fn statutory_by_default() {
        assert_eq!(load_schedule(None).unwrap(), Schedule::default());
    }

    #[test]
    fn bundled_schedule_matches_statutory() {
        let schedule = load_schedule(Some(&data_file("schedule-2020.json"))).unwrap();
        assert_eq!(schedule, Schedule::default());
    }

    #[test]
    fn missing_file() {
        assert!(load_schedule(Some(&data_file("schedule-1999.json"))).is_err());
    }
}
