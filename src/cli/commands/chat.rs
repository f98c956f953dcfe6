use anyhow::Result;

use super::{GlobalOptions, open_session};
use crate::chat::ChatSession;
use crate::ui::handle_prompt_cancellation;

pub async fn run_chat(options: &GlobalOptions) -> Result<()> {
    let handle = open_session(options)?;
    let session = ChatSession::new(handle.controller, handle.view, handle.info);
    handle_prompt_cancellation(session.run()).await
}
