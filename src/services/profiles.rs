use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{ChildProfile, CommunicationProfile, FoodProfile, RoutineProfile, SensoryProfile};

#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Fields for a new profile or a full profile update
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub name: String,
    pub age: String,
    pub sensory: Option<SensoryProfile>,
    pub routine: Option<RoutineProfile>,
    pub food: Option<FoodProfile>,
    pub communication: Option<CommunicationProfile>,
}

/// In-memory child profile store
///
/// Profiles keep insertion order and live for the lifetime of the process.
#[derive(Default)]
pub struct ProfileStore {
    profiles: RwLock<Vec<ChildProfile>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, draft: ProfileDraft) -> Result<ChildProfile, ProfileStoreError> {
        let name = validated_name(&draft.name)?;
        let profile = ChildProfile {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            age: draft.age.trim().to_string(),
            sensory: draft.sensory,
            routine: draft.routine,
            food: draft.food,
            communication: draft.communication,
        };

        self.profiles.write().await.push(profile.clone());
        tracing::debug!("Added profile {}", profile.id);
        Ok(profile)
    }

    /// Replace name and age; sections left as `None` keep their current value
    pub async fn update(&self, id: &str, draft: ProfileDraft) -> Result<ChildProfile, ProfileStoreError> {
        let name = validated_name(&draft.name)?;
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ProfileStoreError::NotFound(id.to_string()))?;

        profile.name = name;
        profile.age = draft.age.trim().to_string();
        if draft.sensory.is_some() {
            profile.sensory = draft.sensory;
        }
        if draft.routine.is_some() {
            profile.routine = draft.routine;
        }
        if draft.food.is_some() {
            profile.food = draft.food;
        }
        if draft.communication.is_some() {
            profile.communication = draft.communication;
        }

        tracing::debug!("Updated profile {}", id);
        Ok(profile.clone())
    }

    pub async fn get(&self, id: &str) -> Option<ChildProfile> {
        self.profiles.read().await.iter().find(|p| p.id == id).cloned()
    }

    pub async fn list(&self) -> Vec<ChildProfile> {
        self.profiles.read().await.clone()
    }
}

fn validated_name(name: &str) -> Result<String, ProfileStoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProfileStoreError::InvalidInput("name must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}
