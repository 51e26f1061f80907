use std::{fs::OpenOptions, mem, path::Path};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::{agent::Agent, error::SaveError, options::SaveOptions};

/// One agent as seen at one sample
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct AgentData {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub energy: f32,
    pub age: u32,
    pub species: usize,
    pub time: u64,
}

/// Accumulates agent snapshots every `sample_rate` ticks
pub struct Observer {
    samples: Vec<AgentData>,
    ticker: u64,
    sample_rate: u64,
}

const PREFIX: &str = "life-data";

impl Observer {
    pub fn new(sample_rate: u64) -> Self {
        Observer {
            samples: Vec::new(),
            ticker: 0,
            sample_rate: sample_rate.max(1),
        }
    }

    /// Triggers data collection
    pub fn watch(&mut self, agents: &[Agent]) {
        if !self.should_sample() {
            return;
        }

        let time = self.ticker / self.sample_rate;
        self.samples.extend(agents.iter().map(|a| AgentData {
            id: a.id,
            x: a.position.x,
            y: a.position.y,
            radius: a.radius,
            energy: a.energy,
            age: a.age,
            species: a.species,
            time,
        }));
    }

    pub fn pop_data(&mut self) -> Vec<AgentData> {
        mem::take(&mut self.samples)
    }

    /// Saves the latest data in CSV format, then returns it while emptying the observer's memory
    ///
    /// Depending on save options, either overwrites the current file or writes a new timestamped file
    pub fn pop_data_save(&mut self, save_options: &SaveOptions) -> Result<Vec<AgentData>, SaveError> {
        let data = self.pop_data();

        if !save_options.save_locations {
            return Ok(data);
        }

        if let Some(path) = &save_options.save_locations_path {
            let file_path =
                Path::new(path).join(Observer::get_dataset_name(save_options, Utc::now()));

            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&file_path)?;
            let mut wtr = csv::Writer::from_writer(file);

            for sample in &data {
                wtr.serialize(sample)?;
            }
            wtr.flush()?;

            info!(rows = data.len(), path = %file_path.display(), "agent data saved");
        }

        Ok(data)
    }

    fn get_dataset_name(save_options: &SaveOptions, now: DateTime<Utc>) -> String {
        match save_options.save_locations_timestamp {
            true => format!(
                "{prefix}_{datetime}.csv",
                prefix = PREFIX,
                datetime = now.timestamp_millis()
            ),
            false => format!("{prefix}.csv", prefix = PREFIX),
        }
    }

    fn should_sample(&mut self) -> bool {
        self.ticker += 1;
        self.ticker % self.sample_rate == 0
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use glam::Vec2;

    use super::Observer;
    use crate::{agent::Agent, options::SaveOptions};

    fn agents() -> Vec<Agent> {
        (0..3)
            .map(|i| {
                let mut a = Agent::new(i as f32, 2. * i as f32, Vec2::ZERO, 3., 0.5, i);
                a.id = i;
                a
            })
            .collect()
    }

    #[test]
    fn test_name_timestamped() {
        let expected = "life-data_1668038059490.csv";
        let save_options = SaveOptions {
            save_locations: true,
            save_locations_path: Some("".to_owned()),
            save_locations_timestamp: true,
        };
        let dt = Utc
            .with_ymd_and_hms(2022, 11, 9, 23, 54, 19)
            .unwrap()
            + chrono::Duration::milliseconds(490);
        let actual = Observer::get_dataset_name(&save_options, dt);

        assert_eq!(actual, expected)
    }

    #[test]
    fn test_name_overwrite() {
        let expected = "life-data.csv";
        let save_options = SaveOptions {
            save_locations: true,
            save_locations_path: Some("".to_owned()),
            save_locations_timestamp: false,
        };
        let actual = Observer::get_dataset_name(&save_options, Utc::now());

        assert_eq!(actual, expected)
    }

    #[test]
    fn samples_every_nth_tick() {
        let mut observer = Observer::new(2);
        let agents = agents();

        for _ in 0..5 {
            observer.watch(&agents);
        }

        let data = observer.pop_data();
        assert_eq!(data.len(), 6);
        assert_eq!(data.iter().map(|d| d.time).max(), Some(2));
        assert_eq!(data[1].y, 2.);
        assert_eq!(data[2].species, 2);
        assert!(observer.pop_data().is_empty());
    }

    #[test]
    fn saves_csv_with_header() {
        let dir = std::env::temp_dir().join(format!("life-observer-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let save_options = SaveOptions {
            save_locations: true,
            save_locations_path: Some(dir.to_string_lossy().into_owned()),
            save_locations_timestamp: false,
        };

        let mut observer = Observer::new(1);
        observer.watch(&agents());
        let data = observer.pop_data_save(&save_options).unwrap();

        let written = std::fs::read_to_string(dir.join("life-data.csv")).unwrap();
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("id,x,y,radius,energy,age,species,time")
        );
        assert_eq!(lines.count(), data.len());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn nothing_written_when_saving_is_off() {
        let mut observer = Observer::new(1);
        observer.watch(&agents());

        let data = observer.pop_data_save(&SaveOptions::default()).unwrap();

        assert_eq!(data.len(), 3);
    }
}
