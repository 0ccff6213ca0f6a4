mod template;

pub use template::TemplateVariables;
