/// Tool metadata injected into the planner prompt.
///
/// `params` is the ordered list of parameter names used by the plan parser's
/// single-positional-argument convention: the first declared parameter
/// receives the task's raw argument text.
#[derive(Clone, Debug)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub params: Vec<String>,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        params: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// The first declared parameter name, if any — the target of the
    /// single-positional-argument convention.
    pub fn first_param(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }
}
