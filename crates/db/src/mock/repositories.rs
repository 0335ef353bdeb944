use async_trait::async_trait;
use mockall::mock;
use planner_core::models::{ReferenceData, Schedule, WeekKey};

use crate::repositories::{ReferenceRepository, ScheduleRepository};

// Mock repositories for testing
mock! {
    pub ScheduleRepo {}

    #[async_trait]
    impl ScheduleRepository for ScheduleRepo {
        async fn load(&self, week: &WeekKey) -> Schedule;

        async fn save(&self, week: &WeekKey, schedule: &Schedule) -> eyre::Result<()>;
    }
}

mock! {
    pub ReferenceRepo {}

    #[async_trait]
    impl ReferenceRepository for ReferenceRepo {
        async fn reference_data(&self) -> ReferenceData;
    }
}
