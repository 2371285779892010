//! Example users loaded into an empty store.

use crate::models::user::CreateUser;

/// The three example users both backends start with.
pub fn sample_users() -> Vec<CreateUser> {
    vec![
        CreateUser::new("John Doe", "E-Commerce Platform Redesign").with_tasks([
            "Wireframe Review",
            "User Testing Session",
            "Prototype Development",
        ]),
        CreateUser::new("Jane Smith", "Mobile App Development").with_tasks([
            "Design Documentation",
            "User Research",
            "Prototype Testing",
        ]),
        CreateUser::new("Mike Johnson", "Dashboard Analytics").with_tasks([
            "Data Visualization",
            "Performance Optimization",
            "User Interface Design",
        ]),
    ]
}
