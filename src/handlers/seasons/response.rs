//! Season response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::models::ChampionRecord;

/// One final standing
#[derive(Debug, Serialize)]
pub struct ChampionResponse {
    pub participant_id: Uuid,
    pub final_position: i32,
    pub final_points: i64,
}

impl From<ChampionRecord> for ChampionResponse {
    fn from(record: ChampionRecord) -> Self {
        Self {
            participant_id: record.participant_id,
            final_position: record.final_position,
            final_points: record.final_points,
        }
    }
}

/// Final standings of a season
#[derive(Debug, Serialize)]
pub struct ChampionsResponse {
    pub season_id: Uuid,
    pub champions: Vec<ChampionResponse>,
}

impl ChampionsResponse {
    pub fn new(season_id: Uuid, records: Vec<ChampionRecord>) -> Self {
        Self {
            season_id,
            champions: records.into_iter().map(ChampionResponse::from).collect(),
        }
    }
}
