//! Aggregation pipelines backing the leaderboard reads.
//!
//! `$lookup` + `$unwind` drops groups whose referenced document is gone, and every pipeline
//! sorts by points descending with the display name and id as tie-breakers.

use mongodb::bson::{Document, doc};
use uuid::Uuid;

use super::models::to_bson_uuid;

pub const TEAM_COLLECTION: &str = "teams";
pub const MEMBER_COLLECTION: &str = "members";
pub const GAME_COLLECTION: &str = "games";
pub const SCORE_COLLECTION: &str = "scores";

/// Team-level rows grouped per team.
pub fn team_standings() -> Vec<Document> {
    vec![
        doc! { "$match": { "member": null } },
        doc! { "$group": { "_id": "$team", "total_points": { "$sum": "$points" } } },
        lookup(TEAM_COLLECTION, "_id", "team"),
        doc! { "$unwind": "$team" },
        doc! {
            "$project": {
                "_id": 0,
                "team_id": "$team._id",
                "team_name": "$team.name",
                "total_points": 1,
            }
        },
        doc! { "$sort": { "total_points": -1, "team_name": 1, "team_id": 1 } },
    ]
}

/// Member-level rows grouped per member, joined with the member's current team.
pub fn member_standings() -> Vec<Document> {
    vec![
        doc! { "$match": { "member": { "$ne": null } } },
        doc! { "$group": { "_id": "$member", "total_points": { "$sum": "$points" } } },
        lookup(MEMBER_COLLECTION, "_id", "member"),
        doc! { "$unwind": "$member" },
        lookup(TEAM_COLLECTION, "member.team", "team"),
        doc! { "$unwind": "$team" },
        doc! {
            "$project": {
                "_id": 0,
                "member_id": "$member._id",
                "member_name": "$member.name",
                "team_id": "$team._id",
                "team_name": "$team.name",
                "total_points": 1,
            }
        },
        doc! { "$sort": { "total_points": -1, "member_name": 1, "member_id": 1 } },
    ]
}

/// One row per game for the team-level scores of `team_id`.
pub fn team_game_scores(team_id: Uuid) -> Vec<Document> {
    game_breakdown(doc! { "team": to_bson_uuid(team_id), "member": null })
}

/// One row per game for the scores of `member_id`.
pub fn member_game_scores(member_id: Uuid) -> Vec<Document> {
    game_breakdown(doc! { "member": to_bson_uuid(member_id) })
}

fn game_breakdown(filter: Document) -> Vec<Document> {
    vec![
        doc! { "$match": filter },
        lookup(GAME_COLLECTION, "game", "game"),
        doc! { "$unwind": "$game" },
        doc! {
            "$project": {
                "_id": 0,
                "game_id": "$game._id",
                "game_name": "$game.name",
                "points": 1,
            }
        },
        doc! { "$sort": { "points": -1, "game_name": 1, "game_id": 1 } },
    ]
}

fn lookup(from: &str, local_field: &str, alias: &str) -> Document {
    doc! {
        "$lookup": {
            "from": from,
            "localField": local_field,
            "foreignField": "_id",
            "as": alias,
        }
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::Bson;

    use super::*;

    fn stage<'a>(pipeline: &'a [Document], name: &str) -> &'a Document {
        pipeline
            .iter()
            .find_map(|stage| stage.get_document(name).ok())
            .unwrap_or_else(|| panic!("missing {name} stage"))
    }

    #[test]
    fn team_standings_only_match_team_level_rows() {
        let pipeline = team_standings();
        assert_eq!(stage(&pipeline, "$match").get("member"), Some(&Bson::Null));
        assert_eq!(
            stage(&pipeline, "$group").get_str("_id").unwrap(),
            "$team"
        );
    }

    #[test]
    fn member_standings_exclude_team_level_rows() {
        let pipeline = member_standings();
        let member_filter = stage(&pipeline, "$match").get_document("member").unwrap();
        assert_eq!(member_filter.get("$ne"), Some(&Bson::Null));
    }

    #[test]
    fn every_pipeline_sorts_descending_by_points() {
        for (pipeline, field) in [
            (team_standings(), "total_points"),
            (member_standings(), "total_points"),
            (team_game_scores(Uuid::new_v4()), "points"),
            (member_game_scores(Uuid::new_v4()), "points"),
        ] {
            let sort = stage(&pipeline, "$sort");
            assert_eq!(sort.keys().next().map(String::as_str), Some(field));
            assert_eq!(sort.get_i32(field).unwrap(), -1);
        }
    }
}
