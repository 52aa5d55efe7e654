//! Dependency-chain resource builder.
//!
//! A scenario's operation under test usually needs a stack of parent
//! resources first (seller, product, inquiry, ...). [`Chain`] declares
//! those creation steps by name and runs them strictly in order,
//! aborting on the first failure. The output keeps creation order and
//! hands handles back by step name, re-typed on retrieval.

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use mall_client::Connection;

use crate::error::{HarnessError, HarnessResult};

/// State threaded through the steps: the connection the chain drives
/// and the handles created so far.
pub struct ChainCtx {
    pub conn: Connection,
    pub handles: ChainOutput,
}

/// Future returned by one step closure: the threaded context plus the
/// handle the step created.
pub type StepFuture = Pin<Box<dyn Future<Output = HarnessResult<(ChainCtx, Value)>>>>;

type StepFn = Box<dyn FnOnce(ChainCtx) -> StepFuture>;

struct Step {
    name: String,
    run: StepFn,
}

/// Ordered list of resource-creation steps.
#[derive(Default)]
pub struct Chain {
    steps: Vec<Step>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a step. Steps run in declaration order; the closure
    /// receives the context (connection plus every earlier handle) and
    /// returns it together with the handle it created.
    pub fn step<F>(mut self, name: impl Into<String>, run: F) -> Self
    where
        F: FnOnce(ChainCtx) -> StepFuture + 'static,
    {
        self.steps.push(Step {
            name: name.into(),
            run: Box::new(run),
        });
        self
    }

    /// Run all steps sequentially, fail-fast.
    ///
    /// The first failing step aborts the remainder; its name is attached
    /// to the error. Nothing is rolled back - scenarios work on fresh
    /// random data, so partial chains are simply abandoned. Session
    /// changes made by steps (joins, logins) are visible on `conn`
    /// afterwards.
    pub async fn run(self, conn: &mut Connection) -> HarnessResult<ChainOutput> {
        let mut names = std::collections::HashSet::new();
        for step in &self.steps {
            if !names.insert(step.name.clone()) {
                return Err(HarnessError::DuplicateStep(step.name.clone()));
            }
        }

        let mut ctx = ChainCtx {
            conn: conn.clone(),
            handles: ChainOutput::default(),
        };
        for step in self.steps {
            tracing::debug!(step = %step.name, "running chain step");
            let (next, value) = (step.run)(ctx).await.map_err(|source| HarnessError::Step {
                step: step.name.clone(),
                source: Box::new(source),
            })?;
            ctx = next;
            ctx.handles.entries.push((step.name, value));
        }

        *conn = ctx.conn;
        Ok(ctx.handles)
    }
}

/// Handles produced by a chain run, in creation order.
#[derive(Debug, Default)]
pub struct ChainOutput {
    entries: Vec<(String, Value)>,
}

impl ChainOutput {
    /// Retrieve a step's handle, re-typed. Deserializing back into the
    /// DTO doubles as a structural re-check of the stored handle.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> HarnessResult<T> {
        let value = self
            .entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| HarnessError::UnknownStep(name.to_string()))?;
        Ok(serde_json::from_value(value)?)
    }

    /// Step names in creation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Store a handle produced inside a step closure.
pub fn handle<T: Serialize>(value: &T) -> HarnessResult<Value> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_conn() -> Connection {
        Connection::new("http://127.0.0.1:1").unwrap()
    }

    #[tokio::test]
    async fn steps_run_in_declaration_order() {
        let chain = Chain::new()
            .step("first", |ctx| {
                Box::pin(async move { Ok((ctx, handle(&"alpha")?)) })
            })
            .step("second", |ctx| {
                Box::pin(async move {
                    // Earlier handles are visible to later steps.
                    let first: String = ctx.handles.get("first")?;
                    let value = handle(&format!("{first}-beta"))?;
                    Ok((ctx, value))
                })
            });

        let output = chain.run(&mut test_conn()).await.unwrap();
        assert_eq!(output.names().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(output.get::<String>("second").unwrap(), "alpha-beta");
    }

    #[tokio::test]
    async fn first_failure_aborts_the_remainder() {
        let chain = Chain::new()
            .step("ok", |ctx| Box::pin(async move { Ok((ctx, handle(&1u32)?)) }))
            .step("boom", |_ctx| {
                Box::pin(async { Err(HarnessError::Setup("simulated failure".to_string())) })
            })
            .step("never", |_ctx| {
                Box::pin(async {
                    panic!("step after a failure must not run");
                })
            });

        let err = chain.run(&mut test_conn()).await.unwrap_err();
        match err {
            HarnessError::Step { step, .. } => assert_eq!(step, "boom"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn duplicate_step_names_are_rejected_before_running() {
        let chain = Chain::new()
            .step("dup", |_ctx| {
                Box::pin(async {
                    panic!("chain with duplicate names must not run any step");
                })
            })
            .step("dup", |ctx| Box::pin(async move { Ok((ctx, handle(&2u32)?)) }));

        let err = chain.run(&mut test_conn()).await.unwrap_err();
        assert!(matches!(err, HarnessError::DuplicateStep(name) if name == "dup"));
    }

    #[tokio::test]
    async fn lookups_check_name_and_shape() {
        let chain = Chain::new().step("number", |ctx| {
            Box::pin(async move { Ok((ctx, handle(&7u32)?)) })
        });
        let output = chain.run(&mut test_conn()).await.unwrap();

        assert!(matches!(
            output.get::<u32>("missing"),
            Err(HarnessError::UnknownStep(_))
        ));
        assert!(matches!(
            output.get::<Vec<String>>("number"),
            Err(HarnessError::Handle(_))
        ));
        assert_eq!(output.get::<u32>("number").unwrap(), 7);
    }

    #[tokio::test]
    async fn session_changes_made_by_steps_stick() {
        use mall_common::SessionToken;

        let chain = Chain::new().step("login", |mut ctx| {
            Box::pin(async move {
                ctx.conn.adopt_session(SessionToken("from-step".into()));
                let value = handle(&"done")?;
                Ok((ctx, value))
            })
        });

        let mut conn = test_conn();
        chain.run(&mut conn).await.unwrap();
        assert_eq!(conn.session().unwrap().as_str(), "from-step");
    }
}
