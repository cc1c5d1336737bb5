//! Demo data for a fresh install.
//!
//! Every record is keyed by something natural (email, course title, career
//! name) and skipped when it already exists, so seeding twice is harmless.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::application::auth::AuthService;
use crate::domain::course::{CourseDraft, ModuleDraft};
use crate::domain::enrollment::{Certification, Enrollment, Progress};
use crate::domain::id::{PathwayId, ProfileId, RecommendationId};
use crate::domain::pathway::{CareerRecommendation, LearningPathway, RecommendationKind};
use crate::domain::profile::{Profile, ProfileUpdate, Role};
use crate::error::Result;
use crate::port::outbound::store::{AccountStore, CatalogStore, EnrollmentStore, PathwayStore};

/// Password of every demo account.
pub const DEMO_PASSWORD: &str = "Password123!";

/// What a seeding run created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub profiles: usize,
    pub courses: usize,
    pub modules: usize,
    pub pathways: usize,
    pub enrollments: usize,
    pub certifications: usize,
    pub recommendations: usize,
}

impl SeedReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

struct DemoUser {
    email: &'static str,
    full_name: &'static str,
    role: Role,
    program: Option<&'static str>,
    interests: &'static [&'static str],
    target_career: Option<&'static str>,
}

const USERS: &[DemoUser] = &[
    DemoUser {
        email: "admin@example.com",
        full_name: "Platform Admin",
        role: Role::Admin,
        program: None,
        interests: &[],
        target_career: None,
    },
    DemoUser {
        email: "frank.miller@example.com",
        full_name: "Frank Miller",
        role: Role::Faculty,
        program: Some("Computer Science"),
        interests: &[],
        target_career: None,
    },
    DemoUser {
        email: "alice.johnson@example.com",
        full_name: "Alice Johnson",
        role: Role::Student,
        program: Some("MS Computer Science"),
        interests: &["Python", "Git", "Algorithms"],
        target_career: Some("Software Engineer"),
    },
    DemoUser {
        email: "bob.smith@example.com",
        full_name: "Bob Smith",
        role: Role::Student,
        program: Some("MS Data Science"),
        interests: &["Python", "Statistics"],
        target_career: Some("Machine Learning Engineer"),
    },
];

struct DemoModule {
    title: &'static str,
    description: &'static str,
    video_url: Option<&'static str>,
    duration_minutes: i32,
    content: &'static str,
}

struct DemoCourse {
    title: &'static str,
    description: &'static str,
    category: &'static str,
    difficulty: &'static str,
    duration_hours: f64,
    tags: &'static [&'static str],
    modules: &'static [DemoModule],
}

const COURSES: &[DemoCourse] = &[
    DemoCourse {
        title: "Introduction to Python Programming",
        description: "Learn Python from scratch with hands-on projects",
        category: "Programming",
        difficulty: "beginner",
        duration_hours: 32.0,
        tags: &["python", "fundamentals"],
        modules: &[
            DemoModule {
                title: "Python Basics - Variables and Data Types",
                description: "Learn about Python variables, strings, numbers, and basic operations",
                video_url: Some("https://www.youtube.com/watch?v=rfscVS0vtbw"),
                duration_minutes: 45,
                content: "Introduction to Python syntax and basic data types",
            },
            DemoModule {
                title: "Control Flow - If Statements and Loops",
                description: "Master conditional statements and loops in Python",
                video_url: Some("https://www.youtube.com/watch?v=DZwmZ8Usvnk"),
                duration_minutes: 50,
                content: "Understanding if/else, for loops, and while loops",
            },
            DemoModule {
                title: "Functions and Modules",
                description: "Create reusable code with functions and modules",
                video_url: Some("https://www.youtube.com/watch?v=9Os0o3wzS_I"),
                duration_minutes: 55,
                content: "Defining functions, parameters, return values, and importing modules",
            },
        ],
    },
    DemoCourse {
        title: "Advanced Machine Learning",
        description: "Master ML algorithms and neural networks",
        category: "AI/ML",
        difficulty: "advanced",
        duration_hours: 48.0,
        tags: &["machine learning", "neural networks"],
        modules: &[
            DemoModule {
                title: "Introduction to Neural Networks",
                description: "Understanding the basics of artificial neural networks",
                video_url: Some("https://www.youtube.com/watch?v=aircAruvnKk"),
                duration_minutes: 60,
                content: "Neural network architecture, activation functions, and forward propagation",
            },
            DemoModule {
                title: "Deep Learning with TensorFlow",
                description: "Build deep learning models using TensorFlow",
                video_url: Some("https://www.youtube.com/watch?v=tPYj3fFJGjk"),
                duration_minutes: 90,
                content: "TensorFlow basics, building models, training, and evaluation",
            },
        ],
    },
    DemoCourse {
        title: "Web Development with React",
        description: "Build modern web applications with React",
        category: "Web Development",
        difficulty: "intermediate",
        duration_hours: 40.0,
        tags: &["react", "javascript", "frontend"],
        modules: &[
            DemoModule {
                title: "React Fundamentals",
                description: "Learn React components, props, and state",
                video_url: Some("https://www.youtube.com/watch?v=Ke90Tje7VS0"),
                duration_minutes: 75,
                content: "JSX, components, props, state management",
            },
            DemoModule {
                title: "React Hooks",
                description: "Master useState, useEffect, and custom hooks",
                video_url: Some("https://www.youtube.com/watch?v=TNhaISOUy6Q"),
                duration_minutes: 60,
                content: "Using hooks for state and side effects",
            },
        ],
    },
    DemoCourse {
        title: "Database Design and SQL",
        description: "Master relational databases and SQL queries",
        category: "Database",
        difficulty: "beginner",
        duration_hours: 24.0,
        tags: &["sql", "databases"],
        modules: &[
            DemoModule {
                title: "SQL Basics",
                description: "Learn SQL SELECT, INSERT, UPDATE, and DELETE",
                video_url: Some("https://www.youtube.com/watch?v=HXV3zeQKqGY"),
                duration_minutes: 50,
                content: "Basic SQL queries and CRUD operations",
            },
            DemoModule {
                title: "Database Design",
                description: "Normalization, relationships, and schema design",
                video_url: Some("https://www.youtube.com/watch?v=ztHopE5Wnpc"),
                duration_minutes: 65,
                content: "ER diagrams, normalization forms, foreign keys",
            },
        ],
    },
    DemoCourse {
        title: "Data Structures and Algorithms",
        description: "Essential CS fundamentals for technical interviews",
        category: "Computer Science",
        difficulty: "intermediate",
        duration_hours: 40.0,
        tags: &["algorithms", "interviews"],
        modules: &[DemoModule {
            title: "Big O Notation",
            description: "Understand time and space complexity",
            video_url: Some("https://www.youtube.com/watch?v=Mo4vesaut8g"),
            duration_minutes: 40,
            content: "Analyzing algorithm efficiency",
        }],
    },
    DemoCourse {
        title: "Cloud Computing with AWS",
        description: "AWS services and cloud architecture",
        category: "Cloud",
        difficulty: "intermediate",
        duration_hours: 30.0,
        tags: &["aws", "cloud"],
        modules: &[
            DemoModule {
                title: "Core AWS Services",
                description: "EC2, S3, RDS and IAM in practice",
                video_url: None,
                duration_minutes: 60,
                content: "Compute, storage, databases and access control on AWS",
            },
            DemoModule {
                title: "Designing for Availability",
                description: "Regions, availability zones and load balancing",
                video_url: None,
                duration_minutes: 45,
                content: "Building fault tolerant architectures",
            },
        ],
    },
    DemoCourse {
        title: "Cybersecurity Basics",
        description: "Introduction to information security",
        category: "Security",
        difficulty: "beginner",
        duration_hours: 20.0,
        tags: &["security"],
        modules: &[
            DemoModule {
                title: "Threats and Vulnerabilities",
                description: "Common attack vectors and how they work",
                video_url: None,
                duration_minutes: 40,
                content: "Phishing, malware, injection and social engineering",
            },
            DemoModule {
                title: "Defensive Practices",
                description: "Passwords, patching and least privilege",
                video_url: None,
                duration_minutes: 35,
                content: "Practical habits that prevent most incidents",
            },
        ],
    },
    DemoCourse {
        title: "Mobile App Development",
        description: "iOS and Android development",
        category: "Mobile",
        difficulty: "intermediate",
        duration_hours: 36.0,
        tags: &["mobile", "ios", "android"],
        modules: &[DemoModule {
            title: "Mobile UI Fundamentals",
            description: "Layouts, navigation and platform conventions",
            video_url: None,
            duration_minutes: 50,
            content: "Designing screens that feel native on both platforms",
        }],
    },
    DemoCourse {
        title: "DevOps Engineering",
        description: "CI/CD, containers, and automation",
        category: "Cloud",
        difficulty: "advanced",
        duration_hours: 36.0,
        tags: &["devops", "docker", "ci/cd"],
        modules: &[
            DemoModule {
                title: "Containers with Docker",
                description: "Images, containers and registries",
                video_url: None,
                duration_minutes: 55,
                content: "Packaging applications as reproducible images",
            },
            DemoModule {
                title: "Continuous Delivery Pipelines",
                description: "Automated build, test and deploy",
                video_url: None,
                duration_minutes: 50,
                content: "Pipeline stages, environments and rollbacks",
            },
        ],
    },
    DemoCourse {
        title: "Data Analysis with Python",
        description: "Pandas, NumPy, and data visualization",
        category: "Data Science",
        difficulty: "beginner",
        duration_hours: 28.0,
        tags: &["python", "pandas", "statistics"],
        modules: &[
            DemoModule {
                title: "DataFrames with Pandas",
                description: "Loading, cleaning and reshaping data",
                video_url: None,
                duration_minutes: 50,
                content: "Series, DataFrames, indexing and group-by",
            },
            DemoModule {
                title: "Visualizing Data",
                description: "Charts that explain your findings",
                video_url: None,
                duration_minutes: 40,
                content: "Matplotlib and seaborn essentials",
            },
        ],
    },
];

struct DemoPathway {
    career_name: &'static str,
    description: &'static str,
    salary_range: &'static str,
    courses: &'static [&'static str],
    certs: &'static [&'static str],
    skills: &'static [&'static str],
    job_outlook: &'static str,
}

const PATHWAYS: &[DemoPathway] = &[
    DemoPathway {
        career_name: "Software Engineer",
        description: "Design and develop software applications",
        salary_range: "$110,000 - $160,000",
        courses: &[
            "Introduction to Python Programming",
            "Web Development with React",
            "Data Structures and Algorithms",
        ],
        certs: &["AWS Certified Developer - Associate"],
        skills: &["Python", "JavaScript", "Git", "Data Structures", "Algorithms"],
        job_outlook: "22% (Much faster than average)",
    },
    DemoPathway {
        career_name: "Machine Learning Engineer",
        description: "Build and deploy ML models for production",
        salary_range: "$130,000 - $180,000",
        courses: &[
            "Introduction to Python Programming",
            "Data Analysis with Python",
            "Advanced Machine Learning",
        ],
        certs: &["TensorFlow Developer Certificate"],
        skills: &["Python", "TensorFlow", "Statistics", "Deep Learning", "MLOps"],
        job_outlook: "31% (Much faster than average)",
    },
    DemoPathway {
        career_name: "Full Stack Developer",
        description: "Develop both frontend and backend applications",
        salary_range: "$100,000 - $150,000",
        courses: &["Web Development with React", "Database Design and SQL"],
        certs: &["Meta Front-End Developer Certificate"],
        skills: &["React", "Node.js", "SQL", "REST APIs", "JavaScript"],
        job_outlook: "20% (Much faster than average)",
    },
];

/// (student email, course title, progress)
const ENROLLMENTS: &[(&str, &str, f64)] = &[
    ("alice.johnson@example.com", "Introduction to Python Programming", 100.0),
    ("alice.johnson@example.com", "Data Structures and Algorithms", 45.0),
    ("alice.johnson@example.com", "Web Development with React", 10.0),
    ("bob.smith@example.com", "Introduction to Python Programming", 70.0),
    ("bob.smith@example.com", "Data Analysis with Python", 30.0),
];

/// (student email, kind, title, reason)
const RECOMMENDATIONS: &[(&str, RecommendationKind, &str, &str)] = &[
    (
        "alice.johnson@example.com",
        RecommendationKind::Course,
        "Database Design and SQL",
        "Rounds out the back-end skills a software engineer needs",
    ),
    (
        "alice.johnson@example.com",
        RecommendationKind::Certification,
        "AWS Certified Developer - Associate",
        "Cloud deployment experience stands out in engineering interviews",
    ),
    (
        "bob.smith@example.com",
        RecommendationKind::Course,
        "Advanced Machine Learning",
        "The next step after Python and data analysis",
    ),
];

pub struct SeedService {
    auth: Arc<AuthService>,
    accounts: Arc<dyn AccountStore>,
    catalog: Arc<dyn CatalogStore>,
    enrollments: Arc<dyn EnrollmentStore>,
    pathways: Arc<dyn PathwayStore>,
}

impl SeedService {
    pub fn new(
        auth: Arc<AuthService>,
        accounts: Arc<dyn AccountStore>,
        catalog: Arc<dyn CatalogStore>,
        enrollments: Arc<dyn EnrollmentStore>,
        pathways: Arc<dyn PathwayStore>,
    ) -> Self {
        Self {
            auth,
            accounts,
            catalog,
            enrollments,
            pathways,
        }
    }

    pub async fn run(&self) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        let mut new_students = Vec::new();
        for user in USERS {
            if self.accounts.find_account_by_email(user.email).await?.is_some() {
                debug!(email = user.email, "Demo account exists");
                continue;
            }
            let mut profile = self
                .auth
                .create_account(user.email, DEMO_PASSWORD, user.full_name, user.role)
                .await?;
            ProfileUpdate {
                program: user.program.map(str::to_string),
                interests: Some(user.interests.iter().map(|i| (*i).to_string()).collect()),
                target_career: user.target_career.map(str::to_string),
                ..ProfileUpdate::default()
            }
            .apply(&mut profile, Utc::now())?;
            self.accounts.update_profile(&profile).await?;
            if user.role == Role::Student {
                new_students.push(profile.email.clone());
            }
            report.profiles += 1;
        }

        let instructor = self.instructor().await?;
        for demo in COURSES {
            if self.catalog.find_course_by_title(demo.title).await?.is_some() {
                continue;
            }
            let (instructor_id, instructor_name) = match &instructor {
                Some(p) => (p.id.clone(), p.full_name.clone()),
                None => (ProfileId::new(), String::new()),
            };
            let now = Utc::now();
            let mut course = CourseDraft {
                title: demo.title.into(),
                description: demo.description.into(),
                category: demo.category.into(),
                difficulty: demo.difficulty.into(),
                duration_hours: demo.duration_hours,
                tags: demo.tags.iter().map(|t| (*t).to_string()).collect(),
            }
            .into_course(instructor_id, instructor_name, now)?;
            if instructor.is_none() {
                course.instructor_id = None;
                course.instructor_name = None;
            }
            self.catalog.insert_course(&course).await?;
            report.courses += 1;

            for (i, m) in demo.modules.iter().enumerate() {
                let module = ModuleDraft {
                    title: m.title.into(),
                    description: m.description.into(),
                    video_url: m.video_url.map(str::to_string),
                    duration_minutes: m.duration_minutes,
                    order_index: None,
                    content: Some(m.content.into()),
                }
                .into_module(course.id.clone(), i as i32 + 1, now)?;
                self.catalog.insert_module(&module).await?;
                report.modules += 1;
            }
        }

        for demo in PATHWAYS {
            if self
                .pathways
                .find_pathway_by_name(demo.career_name)
                .await?
                .is_some()
            {
                continue;
            }
            let strings = |items: &[&str]| -> Vec<String> {
                items.iter().map(|s| (*s).to_string()).collect()
            };
            self.pathways
                .insert_pathway(&LearningPathway {
                    id: PathwayId::new(),
                    career_name: demo.career_name.into(),
                    description: demo.description.into(),
                    salary_range: demo.salary_range.into(),
                    recommended_courses: strings(demo.courses),
                    recommended_certs: strings(demo.certs),
                    recommended_skills: strings(demo.skills),
                    job_outlook: demo.job_outlook.into(),
                    created_at: Utc::now(),
                })
                .await?;
            report.pathways += 1;
        }

        for (email, title, progress) in ENROLLMENTS {
            let (Some(student), Some(course)) = (
                self.accounts.find_account_by_email(email).await?,
                self.catalog.find_course_by_title(title).await?,
            ) else {
                continue;
            };
            let student = student.profile;
            if self
                .enrollments
                .find_enrollment(&student.id, &course.id)
                .await?
                .is_some()
            {
                continue;
            }
            let enrolled_at = Utc::now() - Duration::days(14);
            let mut enrollment = Enrollment::new(student.id.clone(), course.id.clone(), enrolled_at);
            let completed = enrollment.record_progress(Progress::try_new(*progress)?, Utc::now());
            self.enrollments.insert_enrollment(&enrollment).await?;
            report.enrollments += 1;

            if completed {
                let serial: u32 = rand::thread_rng().gen();
                let certification =
                    Certification::issue(student.id.clone(), course.id.clone(), serial, Utc::now());
                self.enrollments.insert_certification(&certification).await?;
                report.certifications += 1;
            }
        }

        for (email, kind, title, reason) in RECOMMENDATIONS {
            if !new_students.iter().any(|s| s == email) {
                continue;
            }
            let Some(account) = self.accounts.find_account_by_email(email).await? else {
                continue;
            };
            self.pathways
                .insert_recommendation(&CareerRecommendation {
                    id: RecommendationId::new(),
                    student_id: account.profile.id,
                    kind: *kind,
                    title: (*title).into(),
                    reason: (*reason).into(),
                    created_at: Utc::now(),
                })
                .await?;
            report.recommendations += 1;
        }

        info!(
            profiles = report.profiles,
            courses = report.courses,
            modules = report.modules,
            pathways = report.pathways,
            enrollments = report.enrollments,
            "Seed complete"
        );
        Ok(report)
    }

    /// The demo faculty member, who teaches every seeded course.
    async fn instructor(&self) -> Result<Option<Profile>> {
        let Some(faculty) = USERS.iter().find(|u| u.role == Role::Faculty) else {
            return Ok(None);
        };
        Ok(self
            .accounts
            .find_account_by_email(faculty.email)
            .await?
            .map(|a| a.profile))
    }
}
