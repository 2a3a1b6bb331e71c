//! Configurable command and message builders shared by the command tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use anyhow::anyhow;
use async_trait::async_trait;

use crate::{
    commands::Command,
    telegram::{Chat, Message, Transport, User},
};

/// Command recording every invocation.
pub struct RecordingCommand {
    pub name: String,
    pub aliases: Vec<&'static str>,
    pub admin_only: bool,
    pub fails: bool,
    pub panics: bool,
    /// Arguments of each call to `execute`
    pub calls: Arc<Mutex<Vec<Vec<String>>>>,
    /// Number of calls to `name`
    pub name_reads: Arc<AtomicUsize>,
}

impl RecordingCommand {
    pub fn new(name: &str) -> Self {
        RecordingCommand {
            name: name.to_owned(),
            aliases: vec![],
            admin_only: false,
            fails: false,
            panics: false,
            calls: Arc::new(Mutex::new(vec![])),
            name_reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_aliases(mut self, aliases: Vec<&'static str>) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn admin_only(mut self) -> Self {
        self.admin_only = true;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fails = true;
        self
    }

    pub fn panicking(mut self) -> Self {
        self.panics = true;
        self
    }
}

#[async_trait]
impl Command for RecordingCommand {
    fn name(&self) -> &str {
        self.name_reads.fetch_add(1, Ordering::SeqCst);
        &self.name
    }

    fn aliases(&self) -> &[&str] {
        &self.aliases
    }

    fn admin_only(&self) -> bool {
        self.admin_only
    }

    async fn execute(
        &self,
        _transport: &dyn Transport,
        _message: &Message,
        args: &[String],
    ) -> Result<(), anyhow::Error> {
        self.calls.lock().unwrap().push(args.to_vec());
        if self.panics {
            panic!("{} crashed", self.name);
        }
        if self.fails {
            return Err(anyhow!("{} exploded", self.name));
        }
        Ok(())
    }
}

/// Builds a message sent by `sender_id` in chat 100.
pub fn create_message(sender_id: i64, text: &str) -> Message {
    Message {
        message_id: 1,
        chat: Chat { id: 100 },
        from: Some(User {
            id: sender_id,
            username: Some("alice".to_owned()),
        }),
        text: Some(text.to_owned()),
    }
}

/// Wraps commands into the shape the registry consumes.
pub fn as_sources(commands: Vec<RecordingCommand>) -> Vec<Arc<dyn Command>> {
    commands
        .into_iter()
        .map(|command| Arc::new(command) as Arc<dyn Command>)
        .collect()
}
