#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Usage {
    Generate,
    Solve,
    Help,
}

#[derive(Debug, Clone)]
pub struct UserQuery {
    pub usage: Usage,
    pub points: u32,
    pub filename: String,
    pub attempts: Option<usize>,
    pub seed: Option<u64>,
    pub config: Option<String>,
    pub sequential: bool,
    pub max_points: u32,
}

impl UserQuery {
    pub fn new() -> UserQuery {
        UserQuery {
            usage: Usage::Help,
            points: 10,
            filename: String::from("points.json"),
            attempts: None,
            seed: None,
            config: None,
            sequential: false,
            max_points: 100_000,
        }
    }
}

impl Default for UserQuery {
    fn default() -> Self {
        UserQuery::new()
    }
}
