use crate::sched::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    pub title: Option<String>,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PartyRules {
    pub quorum: Option<f64>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PartyConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "dataFile")]
    pub data_file: String,
    pub slots: Vec<String>,
    pub participants: Vec<String>,
    pub organizer: String,
    pub rules: Option<PartyRules>,
}

/// The summary header, as written in the output.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub title: String,
    pub organizer: String,
    pub quorum: String,
}

pub const DEFAULT_DATA_FILE: &str = "availability.csv";
pub const DEFAULT_TITLE: &str = "Party scheduler";

impl PartyConfig {
    /// The group used when no configuration file is given.
    pub fn builtin() -> PartyConfig {
        let slots = [
            "Mon evening",
            "Tue evening",
            "Wed evening",
            "Thu evening",
            "Fri evening",
            "Sat morning",
            "Sat afternoon",
            "Sun morning",
            "Sun afternoon",
        ];
        let participants = ["Sore", "Eva", "Drugo", "PG", "Gio", "Gian", "Fado"];
        PartyConfig {
            output_settings: None,
            data_file: DEFAULT_DATA_FILE.to_string(),
            slots: slots.iter().map(|s| s.to_string()).collect(),
            participants: participants.iter().map(|s| s.to_string()).collect(),
            organizer: "Fado".to_string(),
            rules: None,
        }
    }

    pub fn roster(&self) -> SchedResult<Roster> {
        Roster::new(&self.slots, &self.participants, &self.organizer).context(SchedulingSnafu {})
    }

    pub fn rules(&self) -> SchedResult<ScoringRules> {
        match self.rules.as_ref().and_then(|r| r.quorum) {
            None => Ok(ScoringRules::DEFAULT_RULES),
            Some(q) if q.is_finite() && q >= 0.0 => Ok(ScoringRules {
                quorum_threshold: q,
            }),
            Some(q) => InvalidQuorumSnafu { value: q }.fail(),
        }
    }

    pub fn title(&self) -> String {
        self.output_settings
            .as_ref()
            .and_then(|os| os.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    pub fn output_file(&self) -> Option<String> {
        self.output_settings
            .as_ref()
            .and_then(|os| os.output_file.clone())
    }
}

pub fn read_config(path: &str) -> SchedResult<PartyConfig> {
    let config_str = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: PartyConfig = serde_json::from_str(&config_str).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> SchedResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
