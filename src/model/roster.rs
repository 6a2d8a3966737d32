use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{KdError, Result};

/// Player name that marks an unassigned slot.
pub const WILDCARD_NAME: &str = "*";

const NAME_KEY: &str = "nome";
const PLAYERS_KEY: &str = "jogadores";
const KD_KEY: &str = "KD";

/// The whole persisted roster, in file order.
pub type Roster = Vec<Team>;

/// A team and its players.
///
/// The team object is kept as read, key order and `null`s included. Only the
/// `jogadores` array is lifted out into typed players, and it goes back under
/// the same key, in the same position, on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Team {
    fields: Map<String, Value>,
    players: Option<Vec<Player>>,
}

impl Team {
    pub fn name(&self) -> &str {
        self.fields
            .get(NAME_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn players(&self) -> &[Player] {
        self.players.as_deref().unwrap_or_default()
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        self.players.as_deref_mut().unwrap_or_default()
    }
}

impl TryFrom<Map<String, Value>> for Team {
    type Error = String;

    fn try_from(mut fields: Map<String, Value>) -> std::result::Result<Self, Self::Error> {
        if !fields.get(NAME_KEY).is_some_and(Value::is_string) {
            return Err(format!("team `{NAME_KEY}` must be a string"));
        }
        // An array is parked as a null placeholder so the key keeps its slot.
        let players = match fields.get_mut(PLAYERS_KEY) {
            Some(value @ Value::Array(_)) => Some(
                serde_json::from_value::<Vec<Player>>(value.take())
                    .map_err(|e| format!("invalid `{PLAYERS_KEY}`: {e}"))?,
            ),
            Some(Value::Null) | None => None,
            Some(_) => return Err(format!("team `{PLAYERS_KEY}` must be an array")),
        };
        Ok(Self { fields, players })
    }
}

impl From<Team> for Map<String, Value> {
    fn from(team: Team) -> Self {
        let Team {
            mut fields,
            players,
        } = team;
        if let Some(players) = players {
            let players = players.into_iter().map(|p| Value::Object(p.fields)).collect();
            fields.insert(PLAYERS_KEY.to_string(), Value::Array(players));
        }
        fields
    }
}

/// A rostered player, stored as the raw JSON object.
///
/// Missing keys and explicit `null`s stay distinct, so a player this run does
/// not update is written back exactly as it was read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Player {
    fields: Map<String, Value>,
}

impl Player {
    pub fn named(name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(NAME_KEY.to_string(), Value::String(name.into()));
        Self { fields }
    }

    /// The stored name, if it is a string.
    pub fn name(&self) -> Option<&str> {
        self.fields.get(NAME_KEY).and_then(Value::as_str)
    }

    /// The name to look up, or `None` for wildcard, empty and unnamed slots.
    pub fn lookup_name(&self) -> Option<&str> {
        self.name()
            .filter(|name| *name != WILDCARD_NAME && !name.trim().is_empty())
    }

    pub fn kd(&self) -> Option<f64> {
        self.fields.get(KD_KEY).and_then(Value::as_f64)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn set_kd(&mut self, kd: f64) -> Result<()> {
        if kd < 0.0 {
            return Err(KdError::InvalidStat { value: kd });
        }
        let number = Number::from_f64(kd).ok_or(KdError::InvalidStat { value: kd })?;
        self.fields.insert(KD_KEY.to_string(), Value::Number(number));
        Ok(())
    }
}
