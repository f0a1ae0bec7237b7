use anyhow::{bail, Result};
use async_trait::async_trait;
use derek_commands::{
    render_command_feedback, ActionKind, CommandConfig, CommandContext,
    CommandDispatcher, DispatchOutcome, DispatchPlan, IssueCommandHandler, IssueSnapshot,
    IssueState, NoOpReason, RepoCommandPolicy,
};
use serde_json::json;
use tokio::sync::Mutex as AsyncMutex;

/// In-memory repository that applies mutations to a snapshot.
struct InMemoryIssue {
    snapshot: AsyncMutex<IssueSnapshot>,
    comments: AsyncMutex<Vec<String>>,
    reviewers: AsyncMutex<Vec<String>>,
    assignees: AsyncMutex<Vec<String>>,
}

impl InMemoryIssue {
    fn new(snapshot: IssueSnapshot) -> Self {
        Self {
            snapshot: AsyncMutex::new(snapshot),
            comments: AsyncMutex::new(Vec::new()),
            reviewers: AsyncMutex::new(Vec::new()),
            assignees: AsyncMutex::new(Vec::new()),
        }
    }

    async fn snapshot(&self) -> IssueSnapshot {
        self.snapshot.lock().await.clone()
    }
}

#[async_trait]
impl IssueCommandHandler for InMemoryIssue {
    async fn add_labels(&self, labels: &[String]) -> Result<()> {
        self.snapshot.lock().await.labels.extend(labels.iter().cloned());
        Ok(())
    }

    async fn remove_label(&self, label: &str) -> Result<()> {
        let mut snapshot = self.snapshot.lock().await;
        let before = snapshot.labels.len();
        snapshot
            .labels
            .retain(|current| !current.eq_ignore_ascii_case(label));
        if snapshot.labels.len() == before {
            bail!("label '{label}' not present");
        }
        Ok(())
    }

    async fn add_assignee(&self, login: &str) -> Result<()> {
        self.assignees.lock().await.push(login.to_string());
        Ok(())
    }

    async fn remove_assignee(&self, login: &str) -> Result<()> {
        self.assignees.lock().await.retain(|current| current != login);
        Ok(())
    }

    async fn set_state(&self, state: IssueState) -> Result<()> {
        self.snapshot.lock().await.state = state;
        Ok(())
    }

    async fn set_title(&self, title: &str) -> Result<()> {
        self.snapshot.lock().await.title = title.to_string();
        Ok(())
    }

    async fn lock(&self) -> Result<()> {
        self.snapshot.lock().await.locked = true;
        Ok(())
    }

    async fn unlock(&self) -> Result<()> {
        self.snapshot.lock().await.locked = false;
        Ok(())
    }

    async fn set_milestone(&self, title: &str) -> Result<()> {
        self.snapshot.lock().await.milestone = Some(title.to_string());
        Ok(())
    }

    async fn remove_milestone(&self) -> Result<()> {
        self.snapshot.lock().await.milestone = None;
        Ok(())
    }

    async fn request_reviewer(&self, login: &str) -> Result<()> {
        self.reviewers.lock().await.push(login.to_string());
        Ok(())
    }

    async fn remove_reviewer(&self, login: &str) -> Result<()> {
        self.reviewers.lock().await.retain(|current| current != login);
        Ok(())
    }

    async fn post_comment(&self, body: &str) -> Result<()> {
        self.comments.lock().await.push(body.to_string());
        Ok(())
    }
}

fn maintainer() -> CommandContext {
    CommandContext {
        commenter_login: "alexellis".to_string(),
    }
}

fn policy() -> RepoCommandPolicy {
    serde_json::from_value(json!({
        "features": ["comments"],
        "maintainers": ["alexellis"],
        "messages": [{"name": "welcome", "value": "Thanks for contributing!"}]
    }))
    .expect("policy")
}

async fn run(
    dispatcher: &CommandDispatcher,
    issue: &InMemoryIssue,
    body: &str,
    policy: Option<&RepoCommandPolicy>,
) -> (DispatchPlan, DispatchOutcome) {
    let snapshot = issue.snapshot().await;
    let command = dispatcher.interpret(body, &snapshot, &maintainer(), policy);
    let outcome = dispatcher
        .execute(&command, issue)
        .await
        .expect("dispatch should succeed");
    (command.plan, outcome)
}

#[tokio::test]
async fn integration_repeated_commands_become_no_ops() {
    let dispatcher = CommandDispatcher::new(CommandConfig::default()).expect("dispatcher");
    let issue = InMemoryIssue::new(IssueSnapshot {
        number: 9,
        title: "Typo".to_string(),
        ..IssueSnapshot::default()
    });

    for body in ["Derek close", "/lock", "Derek set milestone: 0.9"] {
        let (_, outcome) = run(&dispatcher, &issue, body, None).await;
        assert_eq!(outcome, DispatchOutcome::Applied, "{body}");
        let (plan, outcome) = run(&dispatcher, &issue, body, None).await;
        assert_eq!(outcome, DispatchOutcome::Skipped, "{body}");
        assert!(matches!(plan, DispatchPlan::NoOp { .. }), "{body}: {plan:?}");
    }

    let snapshot = issue.snapshot().await;
    assert_eq!(snapshot.state, IssueState::Closed);
    assert!(snapshot.locked);
    assert_eq!(snapshot.milestone.as_deref(), Some("0.9"));

    let (_, outcome) = run(&dispatcher, &issue, "Derek reopen", None).await;
    assert_eq!(outcome, DispatchOutcome::Applied);
    assert_eq!(issue.snapshot().await.state, IssueState::Open);
}

#[tokio::test]
async fn integration_label_commands_classify_cap_and_protect() {
    let config = CommandConfig {
        multilabel_limit: 2,
        ..CommandConfig::default()
    };
    let dispatcher = CommandDispatcher::new(config).expect("dispatcher");
    let issue = InMemoryIssue::new(IssueSnapshot {
        number: 4,
        labels: vec!["no-dco".to_string()],
        ..IssueSnapshot::default()
    });

    let (plan, _) = run(&dispatcher, &issue, "/add labels: bug, docs, help,", None).await;
    let DispatchPlan::Labels(labels) = &plan else {
        panic!("expected label plan, got {plan:?}");
    };
    assert_eq!(labels.apply, vec!["bug".to_string(), "docs".to_string()]);
    assert_eq!(labels.over_limit, vec!["help".to_string()]);
    assert_eq!(
        issue.snapshot().await.labels,
        vec!["no-dco".to_string(), "bug".to_string(), "docs".to_string()]
    );

    let (plan, outcome) = run(&dispatcher, &issue, "Derek remove label: NO-DCO, BUG", None).await;
    assert_eq!(outcome, DispatchOutcome::Applied);
    let snapshot = issue.snapshot().await;
    assert_eq!(snapshot.labels, vec!["no-dco".to_string(), "docs".to_string()]);

    let feedback = render_command_feedback("", &plan, &snapshot, &maintainer());
    assert!(feedback.contains("The request to remove `NO-DCO` by alexellis was not allowed"));
    assert!(feedback.contains("label(s) of 'BUG' on issue #4 was successfully completed"));
}

#[tokio::test]
async fn integration_policy_gates_commands_and_resolves_messages() {
    let dispatcher = CommandDispatcher::new(CommandConfig::default()).expect("dispatcher");
    let policy = policy();
    let issue = InMemoryIssue::new(IssueSnapshot {
        number: 1,
        is_pull_request: true,
        ..IssueSnapshot::default()
    });

    let (plan, outcome) = run(&dispatcher, &issue, "/msg: welcome", Some(&policy)).await;
    assert_eq!(outcome, DispatchOutcome::Applied);
    assert_eq!(plan.action(), ActionKind::Message);
    assert_eq!(
        issue.comments.lock().await.clone(),
        vec!["Thanks for contributing!".to_string()]
    );

    let (_, outcome) = run(&dispatcher, &issue, "/set reviewer: me", Some(&policy)).await;
    assert_eq!(outcome, DispatchOutcome::Applied);
    assert_eq!(issue.reviewers.lock().await.clone(), vec!["alexellis".to_string()]);

    let snapshot = issue.snapshot().await;
    let stranger = CommandContext {
        commenter_login: "drive-by".to_string(),
    };
    let command = dispatcher.interpret("/close", &snapshot, &stranger, Some(&policy));
    assert!(matches!(command.plan, DispatchPlan::NotPermitted { .. }));
    assert_eq!(
        dispatcher.execute(&command, &issue).await.expect("skip"),
        DispatchOutcome::Skipped
    );
}

#[tokio::test]
async fn integration_unrecognized_and_malformed_comments_never_dispatch() {
    let dispatcher = CommandDispatcher::new(CommandConfig::default()).expect("dispatcher");
    let issue = InMemoryIssue::new(IssueSnapshot::default());

    for body in [
        "LGTM, thanks!",
        "Derek set title: ",
        "derek close",
        "/peel label: demo",
    ] {
        let (plan, outcome) = run(&dispatcher, &issue, body, None).await;
        assert_eq!(plan, DispatchPlan::Unrecognized, "{body}");
        assert_eq!(outcome, DispatchOutcome::Skipped, "{body}");
    }

    let (plan, _) = run(&dispatcher, &issue, "Derek set title:  ", None).await;
    assert_eq!(
        plan,
        DispatchPlan::NoOp {
            action: ActionKind::SetTitle,
            reason: NoOpReason::TitleUnchanged,
        }
    );

    let snapshot = issue.snapshot().await;
    let command = dispatcher.interpret("/assign: me", &snapshot, &maintainer(), None);
    dispatcher.execute(&command, &issue).await.expect("assign");
    assert_eq!(issue.assignees.lock().await.clone(), vec!["alexellis".to_string()]);
}
