use clap::Subcommand;
use eyecare_core::storage::Config;
use eyecare_core::{Advisor, ChatMessage};

#[derive(Subcommand)]
pub enum AdviceAction {
    /// Ask an eye-health question
    Ask {
        /// Free-text question
        text: String,
        /// Print the full transcript as JSON
        #[arg(long)]
        json: bool,
    },
    /// Store the Gemini API key in the OS keyring
    SetKey {
        /// API key value
        key: String,
    },
    /// Remove the stored API key
    ClearKey,
}

pub fn run(action: AdviceAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        AdviceAction::Ask { text, json } => {
            let advisor = Advisor::new(&config.advisor);
            let rt = tokio::runtime::Runtime::new()?;
            let reply = rt.block_on(advisor.ask(&text));
            if json {
                let transcript = vec![ChatMessage::user(&text), ChatMessage::model(&reply)];
                println!("{}", serde_json::to_string_pretty(&transcript)?);
            } else {
                println!("{reply}");
            }
        }
        AdviceAction::SetKey { key } => {
            let mut advisor = Advisor::new(&config.advisor);
            advisor.store_api_key(&key)?;
            println!("api key stored");
        }
        AdviceAction::ClearKey => {
            let mut advisor = Advisor::new(&config.advisor);
            advisor.clear_api_key()?;
            println!("api key cleared");
        }
    }
    Ok(())
}
