use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestRequirement {
    SwordFound,
    TreasuresCollected,
    MonstersDefeated,
}

/// Progress counters the quests are bound to. Part of the persistent player
/// profile, so they survive zone transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestCounters {
    pub sword_found: bool,
    pub treasures_collected: u32,
    pub monsters_defeated: u32,
}

impl QuestCounters {
    pub fn value(&self, requirement: QuestRequirement) -> u32 {
        match requirement {
            QuestRequirement::SwordFound => u32::from(self.sword_found),
            QuestRequirement::TreasuresCollected => self.treasures_collected,
            QuestRequirement::MonstersDefeated => self.monsters_defeated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestReward {
    pub gold: i32,
    pub experience: u32,
    pub item: Option<&'static str>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct QuestDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub requirement: QuestRequirement,
    pub target: u32,
    pub reward: QuestReward,
}

pub static QUESTS: [QuestDefinition; 3] = [
    QuestDefinition {
        id: "sword_quest",
        title: "Find the Lost Sword",
        description: "Search the ancient ruins for the legendary blade",
        requirement: QuestRequirement::SwordFound,
        target: 1,
        reward: QuestReward {
            gold: 200,
            experience: 100,
            item: Some("Health Potion"),
        },
    },
    QuestDefinition {
        id: "treasure_quest",
        title: "Treasure Hunter",
        description: "Collect 10 treasures",
        requirement: QuestRequirement::TreasuresCollected,
        target: 10,
        reward: QuestReward {
            gold: 500,
            experience: 250,
            item: Some("Magic Ring"),
        },
    },
    QuestDefinition {
        id: "monster_quest",
        title: "Monster Slayer",
        description: "Defeat 5 monsters",
        requirement: QuestRequirement::MonstersDefeated,
        target: 5,
        reward: QuestReward {
            gold: 300,
            experience: 150,
            item: Some("Iron Armor"),
        },
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    pub definition: &'static QuestDefinition,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestProgress {
    pub title: &'static str,
    pub description: &'static str,
    pub text: String,
    pub completed: bool,
}

/// Tracks which quests are done. Completion is one-way: once a quest is
/// marked complete it never reappears in [`QuestLog::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestLog {
    quests: Vec<Quest>,
    completed_ids: Vec<&'static str>,
}

impl Default for QuestLog {
    fn default() -> Self {
        Self::new(&QUESTS)
    }
}

impl QuestLog {
    pub fn new(definitions: &'static [QuestDefinition]) -> Self {
        Self {
            quests: definitions
                .iter()
                .map(|definition| Quest {
                    definition,
                    completed: false,
                })
                .collect(),
            completed_ids: Vec::new(),
        }
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn completed_ids(&self) -> &[&'static str] {
        &self.completed_ids
    }

    /// Marks every pending quest whose counter reached its target and
    /// returns the newly completed definitions in declaration order.
    pub fn evaluate(&mut self, counters: &QuestCounters) -> Vec<&'static QuestDefinition> {
        let mut newly_completed = Vec::new();
        for quest in self.quests.iter_mut().filter(|quest| !quest.completed) {
            let definition = quest.definition;
            if counters.value(definition.requirement) >= definition.target {
                quest.completed = true;
                self.completed_ids.push(definition.id);
                info!(quest = definition.id, "quest_completed");
                newly_completed.push(definition);
            }
        }
        newly_completed
    }

    pub fn progress(&self, counters: &QuestCounters) -> Vec<QuestProgress> {
        self.quests
            .iter()
            .map(|quest| {
                let definition = quest.definition;
                let text = if quest.completed {
                    "Completed!".to_string()
                } else {
                    format!(
                        "Progress: {}/{}",
                        counters.value(definition.requirement).min(definition.target),
                        definition.target
                    )
                };
                QuestProgress {
                    title: definition.title,
                    description: definition.description,
                    text,
                    completed: quest.completed,
                }
            })
            .collect()
    }
}
