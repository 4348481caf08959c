//! Compiled-in body-part and exercise catalog.
//!
//! Catalog values are read-only reference data. Lookups that miss fall back
//! to the raw id so a caller always has something to render.

/// A muscle group that exercises are filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyPart {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
}

/// A single exercise belonging to exactly one body part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Exercise {
    /// Stable identifier.
    pub id: &'static str,
    /// Owning body part.
    pub body_part_id: &'static str,
    /// Display name.
    pub name: &'static str,
}

/// All body parts, in display order.
pub const BODY_PARTS: &[BodyPart] = &[
    BodyPart { id: "chest", name: "胸" },
    BodyPart { id: "back", name: "背中" },
    BodyPart { id: "shoulder", name: "肩" },
    BodyPart { id: "leg", name: "脚" },
    BodyPart { id: "arm", name: "腕" },
];

/// All exercises, grouped by body part.
pub const EXERCISES: &[Exercise] = &[
    Exercise { id: "bench_press", body_part_id: "chest", name: "ベンチプレス" },
    Exercise { id: "dumbbell_fly", body_part_id: "chest", name: "ダンベルフライ" },
    Exercise { id: "incline_press", body_part_id: "chest", name: "インクラインプレス" },
    Exercise { id: "lat_pull_down", body_part_id: "back", name: "ラットプルダウン" },
    Exercise { id: "deadlift", body_part_id: "back", name: "デッドリフト" },
    Exercise { id: "seated_row", body_part_id: "back", name: "シーテッドロー" },
    Exercise { id: "shoulder_press", body_part_id: "shoulder", name: "ショルダープレス" },
    Exercise { id: "side_raise", body_part_id: "shoulder", name: "サイドレイズ" },
    Exercise { id: "rear_raise", body_part_id: "shoulder", name: "リアレイズ" },
    Exercise { id: "squat", body_part_id: "leg", name: "スクワット" },
    Exercise { id: "leg_press", body_part_id: "leg", name: "レッグプレス" },
    Exercise { id: "leg_curl", body_part_id: "leg", name: "レッグカール" },
    Exercise { id: "barbell_curl", body_part_id: "arm", name: "バーベルカール" },
    Exercise { id: "dumbbell_curl", body_part_id: "arm", name: "ダンベルカール" },
    Exercise { id: "pushdown", body_part_id: "arm", name: "トライセプスプッシュダウン" },
];

/// Finds a body part by id.
pub fn find_body_part(id: &str) -> Option<&'static BodyPart> {
    BODY_PARTS.iter().find(|b| b.id == id)
}

/// Finds an exercise by id.
pub fn find_exercise(id: &str) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|e| e.id == id)
}

/// Returns the body part's display name, or `id` itself when unknown.
pub fn body_part_name(id: &str) -> &str {
    find_body_part(id).map_or(id, |b| b.name)
}

/// Returns the exercise's display name, or `id` itself when unknown.
pub fn exercise_name(id: &str) -> &str {
    find_exercise(id).map_or(id, |e| e.name)
}

/// Lists the exercises filed under `body_part_id`, in catalog order.
pub fn exercises_for(body_part_id: &str) -> impl Iterator<Item = &'static Exercise> + '_ {
    EXERCISES.iter().filter(move |e| e.body_part_id == body_part_id)
}
