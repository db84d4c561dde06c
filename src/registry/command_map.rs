//! # Command Map
//!
//! String-keyed table of recipes. Every descriptor type owns one; a single
//! shared table holds the built-in defaults that apply when a descriptor does
//! not define a name itself.
//!
//! Default mapping:
//!
//! ```text
//! redis      -> the process-wide current connection
//! client     -> redis.client()
//! connected? -> client.is_connected()
//! reconnect  -> client.reconnect(), then client.is_connected()
//! quit       -> redis.quit()
//! ```

use crate::connection;
use crate::dispatch::DescriptorInstance;
use crate::error::{CommandError, CommandResult};
use crate::value::CommandValue;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// A recipe runs against the instance it was resolved for, with one optional argument
pub type Recipe =
    Arc<dyn Fn(&DescriptorInstance, Option<CommandValue>) -> CommandResult + Send + Sync>;

pub const REDIS: &str = "redis";
pub const CLIENT: &str = "client";
pub const CONNECTED: &str = "connected?";
pub const RECONNECT: &str = "reconnect";
pub const QUIT: &str = "quit";

/// Names with a built-in default recipe
pub const DEFAULT_OPERATIONS: [&str; 5] = [REDIS, CLIENT, CONNECTED, RECONNECT, QUIT];

/// Table from operation name to recipe
#[derive(Clone, Default)]
pub struct CommandMap {
    recipes: HashMap<String, Recipe>,
}

impl CommandMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace the recipe for `name`, returning the replaced one
    pub fn define<F>(&mut self, name: impl Into<String>, recipe: F) -> Option<Recipe>
    where
        F: Fn(&DescriptorInstance, Option<CommandValue>) -> CommandResult + Send + Sync + 'static,
    {
        self.insert(name, Arc::new(recipe))
    }

    pub fn insert(&mut self, name: impl Into<String>, recipe: Recipe) -> Option<Recipe> {
        self.recipes.insert(name.into(), recipe)
    }

    /// Copy every recipe from `other`, replacing names defined in both
    pub fn extend(&mut self, other: &CommandMap) {
        for (name, recipe) in &other.recipes {
            self.recipes.insert(name.clone(), Arc::clone(recipe));
        }
    }

    pub fn get(&self, name: &str) -> Option<Recipe> {
        self.recipes.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.recipes.contains_key(name)
    }

    /// Defined names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.recipes.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl std::fmt::Debug for CommandMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandMap")
            .field("recipes", &self.names())
            .finish()
    }
}

/// True when `name` has a built-in default
pub fn is_default_operation(name: &str) -> bool {
    DEFAULT_OPERATIONS.contains(&name)
}

/// The shared table of built-in recipes
pub fn defaults() -> &'static CommandMap {
    static DEFAULTS: OnceLock<CommandMap> = OnceLock::new();
    DEFAULTS.get_or_init(|| {
        let mut map = CommandMap::new();

        map.define(REDIS, |_, _| {
            connection::current()
                .map(CommandValue::Connection)
                .ok_or(CommandError::NoCurrentConnection)
        });
        map.define(CLIENT, |instance, _| {
            Ok(CommandValue::Client(instance.redis()?.client()))
        });
        map.define(CONNECTED, |instance, _| {
            Ok(CommandValue::Bool(instance.client()?.is_connected()))
        });
        map.define(RECONNECT, |instance, _| {
            let client = instance.client()?;
            client.reconnect()?;
            Ok(CommandValue::Bool(client.is_connected()))
        });
        map.define(QUIT, |instance, _| {
            instance.redis()?.quit()?;
            Ok(CommandValue::Bool(true))
        });

        map
    })
}
