pub struct TemplateVariables<'a> {
    reply: &'a str,
}

impl<'a> TemplateVariables<'a> {
    pub fn new(reply: &'a str) -> Self {
        Self { reply }
    }

    /// Helper to substitute template placeholders in a string.
    ///
    /// Substitution is a single pass, so braces inside the reply itself are
    /// never expanded.
    pub fn substitute_template(&self, s: &str) -> String {
        s.split("{reply}").collect::<Vec<_>>().join(self.reply)
    }
}
