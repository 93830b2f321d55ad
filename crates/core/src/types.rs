/// Identifier type for character records.
///
/// Character ids are small positive integers assigned at upload time
/// (see [`crate::character::next_character_id`]).
pub type CharacterId = i64;
