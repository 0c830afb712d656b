//! Quest log progression.
//!
//! A quest moves `started` → `in_progress` → `completed` as objectives are
//! ticked off, or to `failed` when abandoned. Completed quests stay in the
//! log until archived, which moves their ids into `completed_quests`.

use ironhold_core::error::DomainError;
use ironhold_core::state::{Quest, QuestRewards, QuestStatus, WorldState};
use serde::Serialize;

/// What changed in the quest log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestUpdate {
    /// Quest id.
    pub quest_id: String,
    /// Quest display name.
    pub quest_name: String,
    /// Status after the change.
    pub status: QuestStatus,
    /// Objectives done so far.
    pub objectives_completed: Vec<String>,
    /// Objectives still open.
    pub objectives_remaining: Vec<String>,
    /// Rewards to grant, present only when the quest just completed.
    pub rewards: Option<QuestRewards>,
    /// Player-facing message.
    pub narrative: String,
}

/// Whether `id` is in the log or already archived.
#[must_use]
pub fn is_known(state: &WorldState, id: &str) -> bool {
    state.completed_quests.contains(id) || state.quest_log.iter().any(|q| q.id == id)
}

/// Adds `quest` to the log. Returns `None` if the quest is already in the
/// log or archived.
pub fn start_quest(state: &mut WorldState, quest: Quest) -> Option<QuestUpdate> {
    if is_known(state, &quest.id) {
        return None;
    }

    let mut narrative = format!("New quest accepted: {}!", quest.name);
    if !quest.description.is_empty() {
        narrative.push('\n');
        narrative.push_str(&quest.description);
    }
    let update = QuestUpdate {
        quest_id: quest.id.clone(),
        quest_name: quest.name.clone(),
        status: QuestStatus::Started,
        objectives_completed: Vec::new(),
        objectives_remaining: quest.objectives.clone(),
        rewards: None,
        narrative,
    };
    state.quest_log.push(Quest {
        status: QuestStatus::Started,
        ..quest
    });
    Some(update)
}

fn find_quest<'a>(state: &'a mut WorldState, quest_id: &str) -> Result<&'a mut Quest, DomainError> {
    state
        .quest_log
        .iter_mut()
        .find(|q| q.id == quest_id)
        .ok_or_else(|| DomainError::NotFound(format!("quest {quest_id}")))
}

/// Marks one objective done.
///
/// Returns `Ok(None)` when the objective was already completed. When the
/// last objective is done the quest becomes `completed` and the update
/// carries its rewards; the caller grants them.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the quest is not in the log, and
/// `DomainError::Validation` if the quest is closed or has no such
/// objective.
pub fn complete_objective(
    state: &mut WorldState,
    quest_id: &str,
    objective: &str,
) -> Result<Option<QuestUpdate>, DomainError> {
    let quest = find_quest(state, quest_id)?;

    if matches!(quest.status, QuestStatus::Completed | QuestStatus::Failed) {
        return Err(DomainError::Validation(format!(
            "quest {quest_id} is already {}",
            quest.status.label().to_lowercase()
        )));
    }
    if !quest.objectives.iter().any(|o| o == objective) {
        return Err(DomainError::Validation(format!(
            "quest {quest_id} has no objective {objective:?}"
        )));
    }
    if quest.objectives_completed.iter().any(|o| o == objective) {
        return Ok(None);
    }

    quest.objectives_completed.push(objective.to_owned());
    let remaining: Vec<String> = quest
        .objectives
        .iter()
        .filter(|o| !quest.objectives_completed.contains(*o))
        .cloned()
        .collect();

    let (status, rewards, narrative) = if remaining.is_empty() {
        (
            QuestStatus::Completed,
            Some(quest.rewards),
            format!("Quest Completed: {}!", quest.name),
        )
    } else {
        (
            QuestStatus::InProgress,
            None,
            format!("Quest objective completed: {objective}"),
        )
    };
    quest.status = status;

    Ok(Some(QuestUpdate {
        quest_id: quest.id.clone(),
        quest_name: quest.name.clone(),
        status,
        objectives_completed: quest.objectives_completed.clone(),
        objectives_remaining: remaining,
        rewards,
        narrative,
    }))
}

/// Marks a quest failed.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the quest is not in the log.
pub fn fail_quest(state: &mut WorldState, quest_id: &str) -> Result<(), DomainError> {
    find_quest(state, quest_id)?.status = QuestStatus::Failed;
    Ok(())
}

/// Moves completed quests out of the log into `completed_quests`.
/// Returns the archived ids.
pub fn archive_completed(state: &mut WorldState) -> Vec<String> {
    let (done, open): (Vec<Quest>, Vec<Quest>) = std::mem::take(&mut state.quest_log)
        .into_iter()
        .partition(|q| q.status == QuestStatus::Completed);
    state.quest_log = open;

    let ids: Vec<String> = done.into_iter().map(|q| q.id).collect();
    state.completed_quests.extend(ids.iter().cloned());
    ids
}

/// Quests still being worked on.
#[must_use]
pub fn active_quests(quest_log: &[Quest]) -> Vec<&Quest> {
    quest_log
        .iter()
        .filter(|q| matches!(q.status, QuestStatus::Started | QuestStatus::InProgress))
        .collect()
}

/// Renders the log for display.
#[must_use]
pub fn format_quest_log(quest_log: &[Quest]) -> String {
    if quest_log.is_empty() {
        return "No active quests.".to_owned();
    }

    let mut output = String::from("Quest Log:\n");
    for quest in quest_log {
        output.push_str(&format!("\n[{}] {}\n", quest.status.label(), quest.name));
        output.push_str(&format!("  {}\n", quest.description));
        output.push_str("  Objectives:\n");
        for objective in &quest.objectives {
            let mark = if quest.objectives_completed.contains(objective) {
                '✓'
            } else {
                '○'
            };
            output.push_str(&format!("    {mark} {objective}\n"));
        }
    }
    output
}
