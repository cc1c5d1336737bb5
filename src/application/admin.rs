//! Platform-wide numbers for the admin panel.

use std::sync::Arc;

use serde::Serialize;

use crate::application::profile::require_admin;
use crate::domain::profile::{Profile, Role};
use crate::domain::round_tenth;
use crate::error::Result;
use crate::port::outbound::store::{AccountStore, CatalogStore, CourseCounts, EnrollmentStore};

#[derive(Debug, Clone, Serialize)]
pub struct RoleCount {
    pub role: Role,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub total_profiles: u64,
    pub profiles_by_role: Vec<RoleCount>,
    pub active_courses: u64,
    pub inactive_courses: u64,
    pub total_enrollments: u64,
    pub completed_enrollments: u64,
    pub average_progress: f64,
}

pub struct AdminService {
    accounts: Arc<dyn AccountStore>,
    catalog: Arc<dyn CatalogStore>,
    enrollments: Arc<dyn EnrollmentStore>,
}

impl AdminService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        catalog: Arc<dyn CatalogStore>,
        enrollments: Arc<dyn EnrollmentStore>,
    ) -> Self {
        Self {
            accounts,
            catalog,
            enrollments,
        }
    }

    pub async fn overview(&self, actor: &Profile) -> Result<Overview> {
        require_admin(actor)?;
        let profiles_by_role: Vec<RoleCount> = self
            .accounts
            .count_profiles_by_role()
            .await?
            .into_iter()
            .map(|(role, count)| RoleCount { role, count })
            .collect();
        let CourseCounts { active, inactive } = self.catalog.count_courses().await?;
        let totals = self.enrollments.enrollment_totals().await?;

        Ok(Overview {
            total_profiles: profiles_by_role.iter().map(|r| r.count).sum(),
            profiles_by_role,
            active_courses: active,
            inactive_courses: inactive,
            total_enrollments: totals.total,
            completed_enrollments: totals.completed,
            average_progress: round_tenth(totals.average_progress),
        })
    }
}
