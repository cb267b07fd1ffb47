use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("No section with id '{0}'")]
    SectionNotFound(String),
}
