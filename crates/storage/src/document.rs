use std::collections::BTreeMap;

use chrono::NaiveDate;
use gymlog_domain as domain;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use strum::{AsRefStr, EnumString};

/// Persisted form of the workout log, catalog and settings.
///
/// Reading is lenient at every level: missing or `null` values become empty,
/// reps and weights may be stored as strings or numbers, and a malformed
/// entry of a collection is dropped without affecting its siblings.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Document {
    #[serde(default, deserialize_with = "entry_map")]
    pub workouts: BTreeMap<String, Day>,
    #[serde(default, deserialize_with = "entry_lists")]
    pub catalog: BTreeMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "entry_or_default")]
    pub settings: Settings,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Day {
    #[serde(default, deserialize_with = "text")]
    pub notes: String,
    #[serde(default, deserialize_with = "entry_lists")]
    pub muscles: BTreeMap<String, Vec<Exercise>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Exercise {
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "entry_list")]
    pub sets: Vec<Set>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Set {
    #[serde(default, deserialize_with = "text")]
    pub reps: String,
    #[serde(default, deserialize_with = "text")]
    pub weight: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Settings {
    #[serde(default, deserialize_with = "text")]
    pub theme: String,
}

#[derive(AsRefStr, EnumString, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
enum Theme {
    System,
    Light,
    Dark,
}

impl From<domain::Theme> for Theme {
    fn from(value: domain::Theme) -> Self {
        match value {
            domain::Theme::System => Theme::System,
            domain::Theme::Light => Theme::Light,
            domain::Theme::Dark => Theme::Dark,
        }
    }
}

impl From<Theme> for domain::Theme {
    fn from(value: Theme) -> Self {
        match value {
            Theme::System => domain::Theme::System,
            Theme::Light => domain::Theme::Light,
            Theme::Dark => domain::Theme::Dark,
        }
    }
}

impl From<&domain::Document> for Document {
    fn from(value: &domain::Document) -> Self {
        Self {
            workouts: value
                .workouts
                .iter()
                .map(|(date, day)| (date.to_string(), Day::from(day)))
                .collect(),
            catalog: value
                .catalog
                .iter()
                .map(|(group, names)| (group.to_string(), names.to_vec()))
                .collect(),
            settings: Settings::from(&value.settings),
        }
    }
}

impl From<Document> for domain::Document {
    fn from(value: Document) -> Self {
        Self {
            workouts: value
                .workouts
                .into_iter()
                .filter_map(|(date, day)| {
                    match NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
                        Ok(date) => Some((date, domain::DayEntry::from(day))),
                        Err(err) => {
                            warn!("dropped day with invalid date \"{date}\": {err}");
                            None
                        }
                    }
                })
                .collect(),
            catalog: value
                .catalog
                .into_iter()
                .filter_map(|(group, names)| Some((muscle_group(&group)?, names)))
                .collect(),
            settings: value.settings.into(),
        }
    }
}

impl From<&domain::DayEntry> for Day {
    fn from(value: &domain::DayEntry) -> Self {
        Self {
            notes: value.notes.clone(),
            muscles: value
                .muscles()
                .map(|(group, exercises)| {
                    (
                        group.to_string(),
                        exercises.iter().map(Exercise::from).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl From<Day> for domain::DayEntry {
    fn from(value: Day) -> Self {
        domain::DayEntry::new(
            value.notes,
            value
                .muscles
                .into_iter()
                .filter_map(|(group, exercises)| {
                    Some((
                        muscle_group(&group)?,
                        exercises.into_iter().map(domain::Exercise::from).collect(),
                    ))
                }),
        )
    }
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            name: value.name.clone(),
            sets: value.sets.iter().map(Set::from).collect(),
        }
    }
}

impl From<Exercise> for domain::Exercise {
    fn from(value: Exercise) -> Self {
        Self {
            name: value.name,
            sets: value.sets.into_iter().map(domain::SetRecord::from).collect(),
        }
    }
}

impl From<&domain::SetRecord> for Set {
    fn from(value: &domain::SetRecord) -> Self {
        Self {
            reps: value.reps.clone(),
            weight: value.weight.clone(),
        }
    }
}

impl From<Set> for domain::SetRecord {
    fn from(value: Set) -> Self {
        Self {
            reps: value.reps,
            weight: value.weight,
        }
    }
}

impl From<&domain::Settings> for Settings {
    fn from(value: &domain::Settings) -> Self {
        Self {
            theme: Theme::from(value.theme).as_ref().to_string(),
        }
    }
}

impl From<Settings> for domain::Settings {
    fn from(value: Settings) -> Self {
        let theme = if value.theme.is_empty() {
            domain::Theme::default()
        } else {
            value.theme.parse::<Theme>().map_or_else(
                |_| {
                    warn!("ignored unknown theme \"{}\"", value.theme);
                    domain::Theme::default()
                },
                domain::Theme::from,
            )
        };
        Self { theme }
    }
}

fn muscle_group(value: &str) -> Option<domain::MuscleGroup> {
    domain::MuscleGroup::try_from(value)
        .inspect_err(|err| warn!("dropped entries: {err}"))
        .ok()
}

/// Convert a single entry, or `None` if it is `null` or malformed.
fn entry<T: DeserializeOwned>(value: Value) -> Option<T> {
    if value.is_null() {
        return None;
    }
    serde_json::from_value(value)
        .inspect_err(|err| warn!("dropped malformed entry: {err}"))
        .ok()
}

fn entries<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(values) => values.into_iter().filter_map(entry).collect(),
        Value::Null => vec![],
        value => {
            warn!("dropped malformed list: {value}");
            vec![]
        }
    }
}

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        value => {
            warn!("dropped malformed map: {value}");
            Map::new()
        }
    }
}

fn entry_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(entry(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn entry_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(entries(Value::deserialize(deserializer)?))
}

fn entry_map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(fields(Value::deserialize(deserializer)?)
        .into_iter()
        .filter_map(|(key, value)| Some((key, entry(value)?)))
        .collect())
}

fn entry_lists<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(fields(Value::deserialize(deserializer)?)
        .into_iter()
        .map(|(key, value)| (key, entries(value)))
        .collect())
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => value,
        Value::Number(value) => value.to_string(),
        _ => String::new(),
    })
}
