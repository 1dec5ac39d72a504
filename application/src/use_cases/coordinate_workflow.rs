//! Coordinate Workflow use case
//!
//! Encodes the two-phase project workflow (plan → negotiate → execute) as
//! ordered delegations to agent variants through the [`Dispatcher`] port.

use crate::ports::delegation_logger::{DelegationEvent, DelegationLogger, NoDelegationLogger};
use crate::ports::dispatcher::{DispatchError, Dispatcher};
use crate::ports::progress::{NoProgress, WorkflowProgressNotifier};
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use workflow_domain::{
    ProjectPlan, UserId, WorkflowPhase, WorkflowPromptTemplate, WorkflowRequest,
    WorkflowResponse, WorkflowResult,
};

/// Errors that can occur during a workflow operation
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// The dispatcher failed; the workflow operation stops here.
    #[error("Delegation failed during {phase}: {source}")]
    DelegationFailure {
        phase: WorkflowPhase,
        source: DispatchError,
    },
}

impl WorkflowError {
    /// Phase whose delegation failed
    pub fn phase(&self) -> WorkflowPhase {
        match self {
            WorkflowError::DelegationFailure { phase, .. } => *phase,
        }
    }

    pub fn dispatch_error(&self) -> &DispatchError {
        match self {
            WorkflowError::DelegationFailure { source, .. } => source,
        }
    }

    /// Unwrap the dispatcher's error unchanged
    pub fn into_dispatch_error(self) -> DispatchError {
        match self {
            WorkflowError::DelegationFailure { source, .. } => source,
        }
    }
}

/// Coordinator for project workflows.
///
/// Bound to one dispatcher at construction. Holds no mutable state, so a
/// single instance can drive any number of independent workflows.
pub struct WorkflowCoordinator<D: Dispatcher + 'static> {
    dispatcher: Arc<D>,
    logger: Arc<dyn DelegationLogger>,
}

impl<D: Dispatcher + 'static> WorkflowCoordinator<D> {
    pub fn new(dispatcher: Arc<D>) -> Self {
        Self {
            dispatcher,
            logger: Arc::new(NoDelegationLogger),
        }
    }

    /// Record every delegation to the given logger
    pub fn with_logger(mut self, logger: Arc<dyn DelegationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Turn a brief into a plan awaiting approval.
    ///
    /// The brief is embedded verbatim. `user_id` is forwarded as held by
    /// [`UserId`], which trims surrounding whitespace when parsed.
    pub async fn start_project_workflow(
        &self,
        project_brief: &str,
        user_id: &UserId,
    ) -> Result<WorkflowResult, WorkflowError> {
        self.start_project_workflow_with_progress(project_brief, user_id, &NoProgress)
            .await
    }

    /// Turn a brief into a plan awaiting approval, reporting progress
    pub async fn start_project_workflow_with_progress(
        &self,
        project_brief: &str,
        user_id: &UserId,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<WorkflowResult, WorkflowError> {
        info!("Starting project workflow for user {}", user_id);

        let request = WorkflowRequest::new(
            WorkflowPhase::Planning,
            WorkflowPromptTemplate::planning(project_brief),
            user_id.clone(),
        );
        let response = self.delegate(request, 1, 1, progress).await?;

        info!("Plan received, workflow is negotiating");
        Ok(WorkflowResult::negotiating(
            ProjectPlan::new(response.into_response()),
            project_brief,
        ))
    }

    /// Hand an approved plan to the environment setup and coding agents.
    ///
    /// Both requests carry `user_id` as held by [`UserId`] (trimmed).
    pub async fn execute_project_plan(
        &self,
        plan: &ProjectPlan,
        user_id: &UserId,
    ) -> Result<WorkflowResult, WorkflowError> {
        self.execute_project_plan_with_progress(plan, user_id, &NoProgress)
            .await
    }

    /// Hand an approved plan to the execution agents, reporting progress.
    ///
    /// Environment setup is a precondition for coding: the coding request is
    /// only built once the environment setup response is in hand.
    pub async fn execute_project_plan_with_progress(
        &self,
        plan: &ProjectPlan,
        user_id: &UserId,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<WorkflowResult, WorkflowError> {
        info!("Executing project plan for user {}", user_id);

        let phases = WorkflowPhase::execution_phases();
        let total = phases.len();
        let mut environment_status = Value::Null;
        let mut coding_status = Value::Null;

        // One phase at a time: the next request is built after the previous response
        for (index, phase) in phases.into_iter().enumerate() {
            let message = WorkflowPromptTemplate::execution_message(phase).unwrap_or_default();
            let request = WorkflowRequest::new(phase, message, user_id.clone()).with_plan(plan);
            let response = self.delegate(request, index + 1, total, progress).await?;

            match phase {
                WorkflowPhase::EnvironmentSetup => environment_status = response.into_response(),
                WorkflowPhase::Coding => coding_status = response.into_response(),
                WorkflowPhase::Planning => {}
            }
        }

        info!("Plan handed off, workflow is building");
        Ok(WorkflowResult::building(environment_status, coding_status))
    }

    /// Send one request and wait for it. The only suspension point.
    async fn delegate(
        &self,
        request: WorkflowRequest,
        step: usize,
        total: usize,
        progress: &dyn WorkflowProgressNotifier,
    ) -> Result<WorkflowResponse, WorkflowError> {
        let phase = request.phase();
        progress.on_delegation_start(phase, step, total);
        debug!(
            "Delegating {} to {} ({}/{})",
            request.task_type(),
            request.variant(),
            step,
            total
        );

        self.logger.log(DelegationEvent::new(
            "delegation_sent",
            json!({
                "phase": phase.as_str(),
                "variant": request.variant(),
                "task_type": request.task_type(),
                "user_id": request.user_id().as_str(),
                "message": request.message(),
                "has_context": request.context().is_some(),
            }),
        ));

        match self.dispatcher.dispatch(&request).await {
            Ok(response) => {
                if response.reported_success() == Some(false) {
                    warn!(
                        "{} reported success=false for {}; continuing",
                        request.variant(),
                        request.task_type()
                    );
                }
                self.logger.log(DelegationEvent::new(
                    "delegation_completed",
                    json!({
                        "phase": phase.as_str(),
                        "variant": request.variant(),
                        "response": &response.response,
                    }),
                ));
                progress.on_delegation_complete(phase, true);
                Ok(response)
            }
            Err(e) => {
                warn!("Delegation to {} failed: {}", request.variant(), e);
                self.logger.log(DelegationEvent::new(
                    "delegation_failed",
                    json!({
                        "phase": phase.as_str(),
                        "variant": request.variant(),
                        "error": e.to_string(),
                    }),
                ));
                progress.on_delegation_complete(phase, false);
                Err(WorkflowError::DelegationFailure { phase, source: e })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use workflow_domain::{AgentVariant, TaskType, WorkflowStatus};

    // === Mock implementations ===

    /// Replays scripted results and records every request it receives
    struct MockDispatcher {
        script: Mutex<VecDeque<Result<WorkflowResponse, DispatchError>>>,
        requests: Mutex<Vec<WorkflowRequest>>,
    }

    impl MockDispatcher {
        fn new(script: Vec<Result<WorkflowResponse, DispatchError>>) -> Self {
            Self {
                script: Mutex::new(VecDeque::from(script)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<WorkflowRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Dispatcher for MockDispatcher {
        async fn dispatch(
            &self,
            request: &WorkflowRequest,
        ) -> Result<WorkflowResponse, DispatchError> {
            self.requests.lock().unwrap().push(request.clone());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(DispatchError::Other("No more responses".to_string())))
        }
    }

    /// Yields before answering and records when each response is handed back
    struct OrderingDispatcher {
        events: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Dispatcher for OrderingDispatcher {
        async fn dispatch(
            &self,
            request: &WorkflowRequest,
        ) -> Result<WorkflowResponse, DispatchError> {
            self.events
                .lock()
                .unwrap()
                .push(format!("sent:{}", request.task_type()));
            tokio::task::yield_now().await;
            self.events
                .lock()
                .unwrap()
                .push(format!("returned:{}", request.task_type()));
            Ok(WorkflowResponse::new(request.task_type().as_str()))
        }
    }

    /// Answers with `<user>:<variant>` so concurrent workflows can be told apart
    struct EchoDispatcher;

    #[async_trait]
    impl Dispatcher for EchoDispatcher {
        async fn dispatch(
            &self,
            request: &WorkflowRequest,
        ) -> Result<WorkflowResponse, DispatchError> {
            tokio::task::yield_now().await;
            Ok(WorkflowResponse::new(format!(
                "{}:{}",
                request.user_id(),
                request.variant()
            )))
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<(&'static str, Value)>>,
    }

    impl DelegationLogger for RecordingLogger {
        fn log(&self, event: DelegationEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type, event.payload));
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl WorkflowProgressNotifier for RecordingProgress {
        fn on_delegation_start(&self, phase: WorkflowPhase, step: usize, total: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start:{}:{}/{}", phase.as_str(), step, total));
        }

        fn on_delegation_complete(&self, phase: WorkflowPhase, success: bool) {
            self.events
                .lock()
                .unwrap()
                .push(format!("complete:{}:{}", phase.as_str(), success));
        }
    }

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    // === start_project_workflow ===

    #[tokio::test]
    async fn test_start_returns_negotiating_with_plan() {
        let dispatcher = Arc::new(MockDispatcher::new(vec![Ok(WorkflowResponse::new(
            "Plan: ...",
        ))]));
        let coordinator = WorkflowCoordinator::new(Arc::clone(&dispatcher));

        let result = coordinator
            .start_project_workflow("Build a todo app", &user())
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "success": true,
                "plan": "Plan: ...",
                "project_brief": "Build a todo app",
                "status": "negotiating"
            })
        );
    }

    #[tokio::test]
    async fn test_start_issues_single_planning_request() {
        let dispatcher = Arc::new(MockDispatcher::new(vec![Ok(WorkflowResponse::new(
            "Plan: ...",
        ))]));
        let coordinator = WorkflowCoordinator::new(Arc::clone(&dispatcher));

        coordinator
            .start_project_workflow("Build a todo app", &user())
            .await
            .unwrap();

        let requests = dispatcher.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].variant(), AgentVariant::ScoutCommander);
        assert_eq!(requests[0].task_type(), TaskType::Planning);
        assert_eq!(requests[0].user_id(), &user());
        assert!(requests[0].message().contains("Build a todo app"));
        assert!(requests[0].context().is_none());
    }

    #[tokio::test]
    async fn test_start_keeps_structured_plan() {
        let plan = json!({"steps": ["init repo", "add api"], "stack": "rust"});
        let dispatcher = Arc::new(MockDispatcher::new(vec![Ok(
            WorkflowResponse::new(plan.clone()).with_field("model", "planner"),
        )]));
        let coordinator = WorkflowCoordinator::new(dispatcher);

        let result = coordinator
            .start_project_workflow("Build an API", &user())
            .await
            .unwrap();

        assert_eq!(result.status, WorkflowStatus::Negotiating);
        assert_eq!(result.plan.unwrap().as_value().clone(), plan);
        assert!(result.environment_status.is_none());
        assert!(result.coding_status.is_none());
    }

    #[tokio::test]
    async fn test_start_propagates_dispatch_failure() {
        let dispatcher = Arc::new(MockDispatcher::new(vec![Err(DispatchError::Timeout)]));
        let coordinator = WorkflowCoordinator::new(Arc::clone(&dispatcher));

        let err = coordinator
            .start_project_workflow("Build a todo app", &user())
            .await
            .unwrap_err();

        assert_eq!(err.phase(), WorkflowPhase::Planning);
        assert!(matches!(err.into_dispatch_error(), DispatchError::Timeout));
        assert_eq!(dispatcher.requests().len(), 1);
    }

    // === execute_project_plan ===

    #[tokio::test]
    async fn test_execute_returns_building() {
        let dispatcher = Arc::new(MockDispatcher::new(vec![
            Ok(WorkflowResponse::new("env ready")),
            Ok(WorkflowResponse::new("code done")),
        ]));
        let coordinator = WorkflowCoordinator::new(Arc::clone(&dispatcher));
        let plan = ProjectPlan::new(json!({"steps": ["init repo"]}));

        let result = coordinator
            .execute_project_plan(&plan, &user())
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "success": true,
                "status": "building",
                "environment_status": "env ready",
                "coding_status": "code done"
            })
        );
    }

    #[tokio::test]
    async fn test_execute_issues_environment_setup_then_coding() {
        let dispatcher = Arc::new(MockDispatcher::new(vec![
            Ok(WorkflowResponse::new("env ready")),
            Ok(WorkflowResponse::new("code done")),
        ]));
        let coordinator = WorkflowCoordinator::new(Arc::clone(&dispatcher));
        let plan = ProjectPlan::new(json!({"steps": ["init repo"]}));

        coordinator
            .execute_project_plan(&plan, &user())
            .await
            .unwrap();

        let requests = dispatcher.requests();
        assert_eq!(requests.len(), 2);

        assert_eq!(requests[0].variant(), AgentVariant::EfficiencyBear);
        assert_eq!(requests[0].task_type(), TaskType::EnvironmentSetup);
        assert_eq!(
            requests[0].message(),
            WorkflowPromptTemplate::environment_setup()
        );

        assert_eq!(requests[1].variant(), AgentVariant::CodeReviewBear);
        assert_eq!(requests[1].task_type(), TaskType::Coding);
        assert_eq!(requests[1].message(), WorkflowPromptTemplate::coding());

        for request in &requests {
            assert_eq!(request.user_id(), &user());
            assert_eq!(request.plan(), Some(&json!({"steps": ["init repo"]})));
        }
    }

    #[tokio::test]
    async fn test_execute_follows_execution_phases() {
        let dispatcher = Arc::new(MockDispatcher::new(vec![
            Ok(WorkflowResponse::new("env ready")),
            Ok(WorkflowResponse::new("code done")),
        ]));
        let coordinator = WorkflowCoordinator::new(Arc::clone(&dispatcher));

        let result = coordinator
            .execute_project_plan(&ProjectPlan::new(json!("Plan: ...")), &user())
            .await
            .unwrap();

        let phases: Vec<WorkflowPhase> = dispatcher
            .requests()
            .iter()
            .map(|request| request.phase())
            .collect();
        assert_eq!(phases, WorkflowPhase::execution_phases().to_vec());

        for request in dispatcher.requests() {
            assert_eq!(
                Some(request.message()),
                WorkflowPromptTemplate::execution_message(request.phase())
            );
        }

        // Responses land in the field named after their phase
        assert_eq!(result.environment_status, Some(json!("env ready")));
        assert_eq!(result.coding_status, Some(json!("code done")));
    }

    #[tokio::test]
    async fn test_user_id_is_forwarded_trimmed() {
        let dispatcher = Arc::new(MockDispatcher::new(vec![
            Ok(WorkflowResponse::new("Plan: ...")),
            Ok(WorkflowResponse::new("env ready")),
            Ok(WorkflowResponse::new("code done")),
        ]));
        let coordinator = WorkflowCoordinator::new(Arc::clone(&dispatcher));
        let user_id: UserId = "  alice ".parse().unwrap();

        let started = coordinator
            .start_project_workflow("Build a todo app", &user_id)
            .await
            .unwrap();
        coordinator
            .execute_project_plan(&started.plan.unwrap(), &user_id)
            .await
            .unwrap();

        let requests = dispatcher.requests();
        assert_eq!(requests.len(), 3);
        for request in &requests {
            assert_eq!(request.user_id().as_str(), "alice");
        }
    }

    #[tokio::test]
    async fn test_coding_not_sent_before_environment_returns() {
        let dispatcher = Arc::new(OrderingDispatcher {
            events: Mutex::new(Vec::new()),
        });
        let coordinator = WorkflowCoordinator::new(Arc::clone(&dispatcher));
        let plan = ProjectPlan::new(json!("Plan: ..."));

        coordinator
            .execute_project_plan(&plan, &user())
            .await
            .unwrap();

        let events = dispatcher.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                "sent:environment_setup",
                "returned:environment_setup",
                "sent:coding",
                "returned:coding",
            ]
        );
    }

    #[tokio::test]
    async fn test_execute_stops_after_environment_failure() {
        let dispatcher = Arc::new(MockDispatcher::new(vec![
            Err(DispatchError::ConnectionError("refused".to_string())),
            Ok(WorkflowResponse::new("code done")),
        ]));
        let coordinator = WorkflowCoordinator::new(Arc::clone(&dispatcher));
        let plan = ProjectPlan::new(json!({"steps": ["init repo"]}));

        let err = coordinator
            .execute_project_plan(&plan, &user())
            .await
            .unwrap_err();

        assert_eq!(err.phase(), WorkflowPhase::EnvironmentSetup);
        assert!(matches!(
            err.dispatch_error(),
            DispatchError::ConnectionError(msg) if msg == "refused"
        ));

        let requests = dispatcher.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].task_type(), TaskType::EnvironmentSetup);
    }

    #[tokio::test]
    async fn test_execute_propagates_coding_failure() {
        let dispatcher = Arc::new(MockDispatcher::new(vec![
            Ok(WorkflowResponse::new("env ready")),
            Err(DispatchError::RequestFailed {
                status: 500,
                body: "boom".to_string(),
            }),
        ]));
        let coordinator = WorkflowCoordinator::new(Arc::clone(&dispatcher));
        let plan = ProjectPlan::new(json!("Plan: ..."));

        let err = coordinator
            .execute_project_plan(&plan, &user())
            .await
            .unwrap_err();

        assert_eq!(err.phase(), WorkflowPhase::Coding);
        assert_eq!(dispatcher.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_reported_failure_does_not_short_circuit() {
        let dispatcher = Arc::new(MockDispatcher::new(vec![
            Ok(WorkflowResponse::new("disk full").with_field("success", false)),
            Ok(WorkflowResponse::new("code done")),
        ]));
        let coordinator = WorkflowCoordinator::new(Arc::clone(&dispatcher));
        let plan = ProjectPlan::new(json!("Plan: ..."));

        let result = coordinator
            .execute_project_plan(&plan, &user())
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.environment_status, Some(json!("disk full")));
        assert_eq!(dispatcher.requests().len(), 2);
    }

    // === Round trip ===

    #[tokio::test]
    async fn test_plan_round_trips_into_execution_context() {
        let plan_value = json!({"steps": ["init repo", "write tests"], "notes": null});
        let dispatcher = Arc::new(MockDispatcher::new(vec![
            Ok(WorkflowResponse::new(plan_value.clone())),
            Ok(WorkflowResponse::new("env ready")),
            Ok(WorkflowResponse::new("code done")),
        ]));
        let coordinator = WorkflowCoordinator::new(Arc::clone(&dispatcher));

        let started = coordinator
            .start_project_workflow("Build a todo app", &user())
            .await
            .unwrap();
        let plan = started.plan.unwrap();

        coordinator
            .execute_project_plan(&plan, &user())
            .await
            .unwrap();

        let requests = dispatcher.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].plan(), Some(&plan_value));
        assert_eq!(requests[2].plan(), Some(&plan_value));
    }

    #[tokio::test]
    async fn test_independent_workflows_run_concurrently() {
        let coordinator = WorkflowCoordinator::new(Arc::new(EchoDispatcher));
        let alice = UserId::new("alice").unwrap();
        let bob = UserId::new("bob").unwrap();
        let plan = ProjectPlan::new(json!("Plan: ..."));

        let (started, executed) = tokio::join!(
            coordinator.start_project_workflow("Build a todo app", &alice),
            coordinator.execute_project_plan(&plan, &bob),
        );

        assert_eq!(
            started.unwrap().plan.unwrap().as_value().clone(),
            json!("alice:scout_commander")
        );
        let executed = executed.unwrap();
        assert_eq!(
            executed.environment_status,
            Some(json!("bob:efficiency_bear"))
        );
        assert_eq!(executed.coding_status, Some(json!("bob:code_review_bear")));
    }

    // === Observation hooks ===

    #[tokio::test]
    async fn test_progress_and_log_events_on_success() {
        let dispatcher = Arc::new(MockDispatcher::new(vec![
            Ok(WorkflowResponse::new("env ready")),
            Ok(WorkflowResponse::new("code done")),
        ]));
        let logger = Arc::new(RecordingLogger::default());
        let coordinator = WorkflowCoordinator::new(dispatcher)
            .with_logger(Arc::clone(&logger) as Arc<dyn DelegationLogger>);
        let progress = RecordingProgress::default();
        let plan = ProjectPlan::new(json!("Plan: ..."));

        coordinator
            .execute_project_plan_with_progress(&plan, &user(), &progress)
            .await
            .unwrap();

        assert_eq!(
            progress.events.lock().unwrap().clone(),
            vec![
                "start:environment_setup:1/2",
                "complete:environment_setup:true",
                "start:coding:2/2",
                "complete:coding:true",
            ]
        );

        let events = logger.events.lock().unwrap();
        let types: Vec<_> = events.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            types,
            vec![
                "delegation_sent",
                "delegation_completed",
                "delegation_sent",
                "delegation_completed",
            ]
        );
        assert_eq!(events[0].1["variant"], "efficiency_bear");
        assert_eq!(events[0].1["user_id"], "user-1");
        assert_eq!(events[0].1["has_context"], true);
        assert_eq!(events[1].1["response"], "env ready");
        assert_eq!(events[2].1["task_type"], "coding");
    }

    #[tokio::test]
    async fn test_progress_and_log_events_on_failure() {
        let dispatcher = Arc::new(MockDispatcher::new(vec![Err(DispatchError::Timeout)]));
        let logger = Arc::new(RecordingLogger::default());
        let coordinator = WorkflowCoordinator::new(dispatcher)
            .with_logger(Arc::clone(&logger) as Arc<dyn DelegationLogger>);
        let progress = RecordingProgress::default();

        let result = coordinator
            .start_project_workflow_with_progress("Build a todo app", &user(), &progress)
            .await;
        assert!(result.is_err());

        assert_eq!(
            progress.events.lock().unwrap().clone(),
            vec!["start:planning:1/1", "complete:planning:false"]
        );

        let events = logger.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].0, "delegation_failed");
        assert_eq!(events[1].1["error"], "Timeout");
    }

    #[test]
    fn test_error_display_includes_phase() {
        let err = WorkflowError::DelegationFailure {
            phase: WorkflowPhase::EnvironmentSetup,
            source: DispatchError::Timeout,
        };
        assert_eq!(
            err.to_string(),
            "Delegation failed during Environment Setup: Timeout"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
