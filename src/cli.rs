use clap::Parser;

use crate::core::config::Overrides;

#[derive(Debug, Parser)]
#[command(name = "exam-admin", about = "Manage exams, questions and assignments", version)]
pub(crate) struct Cli {
    #[arg(long, help = "Base URL of the exam API, e.g. http://localhost:5000/api")]
    pub(crate) base_url: Option<String>,

    #[arg(long, help = "Bearer token of the admin session")]
    pub(crate) token: Option<String>,

    #[arg(long, help = "Emit logs as JSON on stderr")]
    pub(crate) log_json: bool,
}

impl Cli {
    pub(crate) fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            token: self.token.clone(),
            log_json: self.log_json,
        }
    }
}
