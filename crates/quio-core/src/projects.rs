//! Projects that quotes are filed under.

use quio_types::project::Project;

#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    current_project_id: Option<String>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Newest first.
    pub fn add_project(&mut self, project: Project) {
        self.projects.insert(0, project);
    }

    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
    }

    pub fn set_current_project(&mut self, id: Option<String>) {
        self.current_project_id = id;
    }

    pub fn current_project_id(&self) -> Option<&str> {
        self.current_project_id.as_deref()
    }

    pub fn current_project(&self) -> Option<&Project> {
        let id = self.current_project_id.as_deref()?;
        self.projects.iter().find(|p| p.id.as_deref() == Some(id))
    }
}
