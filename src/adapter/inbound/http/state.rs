//! Shared handler state.

use std::sync::Arc;

use crate::application::admin::AdminService;
use crate::application::auth::{AuthPolicy, AuthService};
use crate::application::career::CareerService;
use crate::application::catalog::CatalogService;
use crate::application::dashboard::DashboardService;
use crate::application::enrollment::EnrollmentService;
use crate::application::notification::NotificationService;
use crate::application::profile::ProfileService;
use crate::application::quiz::QuizService;
use crate::application::recommendation::RecommendationService;
use crate::application::tutor::config::TutorConfig;
use crate::application::tutor::TutorService;
use crate::port::outbound::llm::Llm;
use crate::port::outbound::mailer::Mailer;
use crate::port::outbound::store::{
    AccountStore, ActivityStore, AssessmentStore, CatalogStore, EnrollmentStore,
    NotificationStore, PathwayStore,
};

/// Services shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub profiles: Arc<ProfileService>,
    pub catalog: Arc<CatalogService>,
    pub enrollments: Arc<EnrollmentService>,
    pub notifications: Arc<NotificationService>,
    pub dashboard: Arc<DashboardService>,
    pub tutor: Arc<TutorService>,
    pub quizzes: Arc<QuizService>,
    pub recommendations: Arc<RecommendationService>,
    pub careers: Arc<CareerService>,
    pub admin: Arc<AdminService>,
}

impl AppState {
    /// Wire every service to one store that implements all store ports.
    pub fn new<S>(
        store: Arc<S>,
        mailer: Arc<dyn Mailer>,
        llm: Option<Arc<dyn Llm>>,
        policy: AuthPolicy,
        tutor: TutorConfig,
    ) -> Self
    where
        S: AccountStore
            + CatalogStore
            + EnrollmentStore
            + NotificationStore
            + AssessmentStore
            + ActivityStore
            + PathwayStore
            + 'static,
    {
        Self {
            auth: Arc::new(AuthService::new(store.clone(), mailer, policy)),
            profiles: Arc::new(ProfileService::new(store.clone())),
            catalog: Arc::new(CatalogService::new(store.clone())),
            enrollments: Arc::new(EnrollmentService::new(
                store.clone(),
                store.clone(),
                store.clone(),
            )),
            notifications: Arc::new(NotificationService::new(store.clone(), store.clone())),
            dashboard: Arc::new(DashboardService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                store.clone(),
            )),
            tutor: Arc::new(TutorService::new(store.clone(), store.clone(), llm, tutor)),
            quizzes: Arc::new(QuizService::new(store.clone(), store.clone())),
            recommendations: Arc::new(RecommendationService::new(
                store.clone(),
                store.clone(),
                store.clone(),
            )),
            careers: Arc::new(CareerService::new(store.clone(), store.clone(), store.clone())),
            admin: Arc::new(AdminService::new(store.clone(), store.clone(), store)),
        }
    }
}
