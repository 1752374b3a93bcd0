//! 服务层场景测试（内存存储）

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_classroom_next::errors::ClassroomError;
use rust_classroom_next::models::{
    class_members::{
        entities::MemberLevel,
        requests::{AddMemberRequest, UpdateMemberRequest},
    },
    class_schedules::requests::CreateScheduleRequest,
    class_tasks::requests::{CreateTaskRequest, TaskRangeQuery, UpdateTaskRequest},
    classes::{
        entities::Class,
        requests::{CreateClassRequest, UpdateClassRequest},
    },
    users::requests::{CreateUserRequest, UpdateUserRequest},
};
use rust_classroom_next::runtime::RequestContext;
use rust_classroom_next::services::{
    ClassMemberService, ClassScheduleService, ClassService, ClassTaskService, UserService,
};
use rust_classroom_next::storage::{
    ClassMemberRepository, ClassRepository, MemoryStorage, Storage, UserRepository,
};

struct Fixture {
    storage: Arc<dyn Storage>,
    classes: ClassService,
    members: ClassMemberService,
    tasks: ClassTaskService,
    schedules: ClassScheduleService,
    users: UserService,
    ctx: RequestContext,
}

impl Fixture {
    async fn new() -> Self {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let ctx = RequestContext::background();

        for (user_id, username) in [("u1", "alice"), ("u2", "bob"), ("u3", "carol")] {
            storage
                .create_user(
                    &ctx,
                    CreateUserRequest {
                        user_id: user_id.to_string(),
                        username: username.to_string(),
                        name: username.to_string(),
                        email: format!("{username}@example.com"),
                    },
                )
                .await
                .unwrap();
        }

        Self {
            classes: ClassService::new(storage.clone()),
            members: ClassMemberService::new(storage.clone()),
            tasks: ClassTaskService::new(storage.clone()),
            schedules: ClassScheduleService::new(storage.clone()),
            users: UserService::new(storage.clone()),
            storage,
            ctx,
        }
    }

    async fn class_owned_by_u1(&self) -> Class {
        self.classes
            .create_class(
                &self.ctx,
                "u1",
                CreateClassRequest {
                    name: "math".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap()
    }

    async fn add(&self, caller: &str, class_id: &str, username: &str, level: Option<MemberLevel>) {
        self.members
            .add_member_by_username(
                &self.ctx,
                caller,
                class_id,
                AddMemberRequest {
                    username: username.to_string(),
                    level,
                },
            )
            .await
            .unwrap();
    }
}

fn task(name: &str, due_date: chrono::DateTime<Utc>) -> CreateTaskRequest {
    CreateTaskRequest {
        name: name.to_string(),
        description: Some("read chapter 3".to_string()),
        due_date,
    }
}

fn schedule(name: &str, day: i16) -> CreateScheduleRequest {
    CreateScheduleRequest {
        name: name.to_string(),
        start_at: 8 * 3600,
        duration: 45,
        day,
    }
}

fn assert_forbidden<T: std::fmt::Debug>(result: Result<T, ClassroomError>) {
    match result {
        Err(ClassroomError::Forbidden(_)) => {}
        other => panic!("expected Forbidden, got {other:?}"),
    }
}

#[tokio::test]
async fn test_owner_auto_membership() {
    let f = Fixture::new().await;
    let class = f.class_owned_by_u1().await;

    assert_eq!(class.owner_id, "u1");
    let owner = f.storage.get_member(&f.ctx, &class.class_id, "u1").await.unwrap();
    assert_eq!(owner.level, MemberLevel::Owner);
}

#[tokio::test]
async fn test_member_add_and_remove() {
    let f = Fixture::new().await;
    let class = f.class_owned_by_u1().await;

    f.add("u1", &class.class_id, "bob", None).await;

    let members = f.members.list_members(&f.ctx, "u1", &class.class_id).await.unwrap();
    assert_eq!(members.len(), 2);
    let bob = members.iter().find(|m| m.user_id == "u2").unwrap();
    assert_eq!(bob.level, MemberLevel::Member);

    f.members
        .delete_member(&f.ctx, "u1", &class.class_id, "u2")
        .await
        .unwrap();
    let members = f.members.list_members(&f.ctx, "u1", &class.class_id).await.unwrap();
    assert_eq!(members.len(), 1);

    // 已不存在的成员再次删除不报错
    f.members
        .delete_member(&f.ctx, "u1", &class.class_id, "u2")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_add_member_rules() {
    let f = Fixture::new().await;
    let class = f.class_owned_by_u1().await;

    let err = f
        .members
        .add_member_by_username(
            &f.ctx,
            "u1",
            &class.class_id,
            AddMemberRequest {
                username: "nobody".to_string(),
                level: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClassroomError::Unprocessable(_)));
    assert_eq!(err.message(), "can not find user with username \"nobody\"");

    assert_forbidden(
        f.members
            .add_member_by_username(
                &f.ctx,
                "u1",
                &class.class_id,
                AddMemberRequest {
                    username: "bob".to_string(),
                    level: Some(MemberLevel::Owner),
                },
            )
            .await,
    );

    // 非成员不能添加
    assert_forbidden(
        f.members
            .add_member_by_username(
                &f.ctx,
                "u3",
                &class.class_id,
                AddMemberRequest {
                    username: "bob".to_string(),
                    level: None,
                },
            )
            .await,
    );

    // 重复添加
    f.add("u1", &class.class_id, "bob", Some(MemberLevel::Admin)).await;
    let err = f
        .members
        .add_member_by_username(
            &f.ctx,
            "u1",
            &class.class_id,
            AddMemberRequest {
                username: "bob".to_string(),
                level: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClassroomError::AlreadyExists(_)));

    // admin 可以授予同级的 admin
    f.add("u2", &class.class_id, "carol", Some(MemberLevel::Admin)).await;
}

#[tokio::test]
async fn test_level_ceiling_and_owner_protection() {
    let f = Fixture::new().await;
    let class = f.class_owned_by_u1().await;
    f.add("u1", &class.class_id, "bob", Some(MemberLevel::Admin)).await;
    f.add("u1", &class.class_id, "carol", None).await;

    assert_forbidden(
        f.members
            .update_member(
                &f.ctx,
                "u2",
                &class.class_id,
                "u3",
                UpdateMemberRequest {
                    level: Some(MemberLevel::Owner),
                },
            )
            .await,
    );
    assert_forbidden(
        f.members
            .update_member(
                &f.ctx,
                "u2",
                &class.class_id,
                "u1",
                UpdateMemberRequest {
                    level: Some(MemberLevel::Member),
                },
            )
            .await,
    );
    assert_forbidden(
        f.members
            .delete_member(&f.ctx, "u2", &class.class_id, "u1")
            .await,
    );
    assert_forbidden(
        f.members
            .delete_member(&f.ctx, "u1", &class.class_id, "u1")
            .await,
    );

    // member 不能管理成员
    assert_forbidden(f.members.list_members(&f.ctx, "u3", &class.class_id).await);

    let err = f
        .members
        .update_member(
            &f.ctx,
            "u1",
            &class.class_id,
            "missing",
            UpdateMemberRequest {
                level: Some(MemberLevel::Admin),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_promotion_allows_class_delete() {
    let f = Fixture::new().await;
    let class = f.class_owned_by_u1().await;
    f.add("u1", &class.class_id, "bob", None).await;

    assert_forbidden(f.classes.delete_class(&f.ctx, "u2", &class.class_id).await);

    let promoted = f
        .members
        .update_member(
            &f.ctx,
            "u1",
            &class.class_id,
            "u2",
            UpdateMemberRequest {
                level: Some(MemberLevel::Admin),
            },
        )
        .await
        .unwrap();
    assert_eq!(promoted.level, MemberLevel::Admin);

    f.classes
        .delete_class(&f.ctx, "u2", &class.class_id)
        .await
        .unwrap();
    let err = f
        .classes
        .get_class_info(&f.ctx, &class.class_id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.message(),
        format!("can not find class with id \"{}\"", class.class_id)
    );
}

#[tokio::test]
async fn test_update_class_requires_admin_and_is_partial() {
    let f = Fixture::new().await;
    let class = f.class_owned_by_u1().await;
    f.add("u1", &class.class_id, "bob", None).await;

    assert_forbidden(
        f.classes
            .update_class(&f.ctx, "u2", &class.class_id, UpdateClassRequest::default())
            .await,
    );

    let updated = f
        .classes
        .update_class(
            &f.ctx,
            "u1",
            &class.class_id,
            UpdateClassRequest {
                name: None,
                description: Some("algebra and geometry".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, class.name);
    assert_eq!(updated.description, "algebra and geometry");
    assert_eq!(updated.owner_id, class.owner_id);
    assert_eq!(updated.created_at, class.created_at);

    let err = f
        .classes
        .update_class(
            &f.ctx,
            "u1",
            &class.class_id,
            UpdateClassRequest {
                name: Some("a".repeat(21)),
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClassroomError::Validation(_)));
}

#[tokio::test]
async fn test_empty_patch_fields_are_no_ops() {
    let f = Fixture::new().await;
    let class = f.class_owned_by_u1().await;

    let updated = f
        .classes
        .update_class(
            &f.ctx,
            "u1",
            &class.class_id,
            UpdateClassRequest {
                name: Some(String::new()),
                description: Some("x".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, class.name);
    assert_eq!(updated.description, "x");

    let task = f
        .tasks
        .create_task(
            &f.ctx,
            "u1",
            &class.class_id,
            CreateTaskRequest {
                name: "essay".to_string(),
                description: Some("draft".to_string()),
                due_date: Utc::now() + Duration::days(1),
            },
        )
        .await
        .unwrap();
    let updated = f
        .tasks
        .update_task(
            &f.ctx,
            "u1",
            &task.task_id,
            UpdateTaskRequest {
                name: Some(String::new()),
                description: Some(String::new()),
                due_date: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "essay");
    assert_eq!(updated.description, "draft");

    let user = f
        .users
        .update_user(
            &f.ctx,
            "u1",
            UpdateUserRequest {
                username: Some(String::new()),
                name: Some("Alice W".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.name, "Alice W");
}

#[tokio::test]
async fn test_missing_class_is_not_found() {
    let f = Fixture::new().await;

    let err = f
        .members
        .list_members(&f.ctx, "u1", "missing")
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = f
        .classes
        .delete_class(&f.ctx, "u1", "missing")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_class_lookup_by_name() {
    let f = Fixture::new().await;
    let class = f.class_owned_by_u1().await;

    let found = f
        .classes
        .get_class_info_by_name(&f.ctx, "alice", "math")
        .await
        .unwrap();
    assert_eq!(found, class);

    let err = f
        .classes
        .get_class_info_by_name(&f.ctx, "alice", "art")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.message().contains("\"art\""));

    let err = f
        .classes
        .get_class_info_by_name(&f.ctx, "nobody", "math")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.message().contains("\"nobody\""));
}

#[tokio::test]
async fn test_create_class_validation() {
    let f = Fixture::new().await;

    for name in [String::new(), "x".repeat(21)] {
        let err = f
            .classes
            .create_class(
                &f.ctx,
                "u1",
                CreateClassRequest {
                    name,
                    description: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ClassroomError::Validation(_)));
    }
    assert!(
        f.storage
            .get_classes_by_owner_id(&f.ctx, "u1")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_task_gate() {
    let f = Fixture::new().await;
    let class = f.class_owned_by_u1().await;
    let due = Utc::now() + Duration::days(1);

    assert_forbidden(
        f.tasks
            .create_task(&f.ctx, "u3", &class.class_id, task("essay", due))
            .await,
    );

    let created = f
        .tasks
        .create_task(&f.ctx, "u1", &class.class_id, task("essay", due))
        .await
        .unwrap();
    assert_eq!(created.author_id, "u1");
    assert_eq!(created.class_id, class.class_id);

    let now = Utc::now();
    let tasks = f
        .tasks
        .get_tasks_with_range(
            &f.ctx,
            &class.class_id,
            TaskRangeQuery {
                from: Some(now),
                to: Some(now + Duration::days(7)),
            },
        )
        .await
        .unwrap();
    assert_eq!(tasks, vec![created.clone()]);

    // 默认窗口为一周
    let tasks = f
        .classes
        .list_tasks(&f.ctx, &class.class_id, TaskRangeQuery::default())
        .await
        .unwrap();
    assert_eq!(tasks, vec![created]);

    f.tasks
        .create_task(
            &f.ctx,
            "u1",
            &class.class_id,
            task("far", Utc::now() + Duration::days(8)),
        )
        .await
        .unwrap();
    let tasks = f
        .tasks
        .get_tasks_with_range(&f.ctx, &class.class_id, TaskRangeQuery::default())
        .await
        .unwrap();
    assert_eq!(tasks.len(), 1);
}

#[tokio::test]
async fn test_task_update_and_delete_rules() {
    let f = Fixture::new().await;
    let class = f.class_owned_by_u1().await;
    f.add("u1", &class.class_id, "bob", None).await;
    f.add("u1", &class.class_id, "carol", None).await;

    let due = Utc::now() + Duration::days(2);
    let created = f
        .tasks
        .create_task(&f.ctx, "u2", &class.class_id, task("lab", due))
        .await
        .unwrap();

    // 作者只需 member
    let updated = f
        .tasks
        .update_task(
            &f.ctx,
            "u2",
            &created.task_id,
            UpdateTaskRequest {
                name: Some("lab report".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "lab report");
    assert_eq!(updated.description, created.description);

    // 其他 member 不行
    assert_forbidden(
        f.tasks
            .update_task(&f.ctx, "u3", &created.task_id, UpdateTaskRequest::default())
            .await,
    );

    // 删除需要 admin
    assert_forbidden(f.tasks.delete_task(&f.ctx, "u2", &created.task_id).await);
    f.tasks
        .delete_task(&f.ctx, "u1", &created.task_id)
        .await
        .unwrap();

    let err = f
        .tasks
        .delete_task(&f.ctx, "u1", &created.task_id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.message(),
        format!("can not find task with id \"{}\"", created.task_id)
    );
}

#[tokio::test]
async fn test_task_of_deleted_class() {
    let f = Fixture::new().await;
    let class = f.class_owned_by_u1().await;
    let created = f
        .tasks
        .create_task(
            &f.ctx,
            "u1",
            &class.class_id,
            task("orphan", Utc::now() + Duration::days(1)),
        )
        .await
        .unwrap();

    f.classes
        .delete_class(&f.ctx, "u1", &class.class_id)
        .await
        .unwrap();

    let err = f
        .tasks
        .delete_task(&f.ctx, "u1", &created.task_id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.message().contains(&class.class_id));
}

#[tokio::test]
async fn test_schedule_clear() {
    let f = Fixture::new().await;
    let class = f.class_owned_by_u1().await;

    for (name, day) in [("a", 1), ("b", 1), ("c", 2)] {
        f.schedules
            .create_schedule(&f.ctx, "u1", &class.class_id, schedule(name, day))
            .await
            .unwrap();
    }

    let removed = f
        .schedules
        .clear_schedules(&f.ctx, "u1", &class.class_id, 1)
        .await
        .unwrap();
    assert_eq!(removed, 2);

    let removed = f
        .schedules
        .clear_schedules(&f.ctx, "u1", &class.class_id, 1)
        .await
        .unwrap();
    assert_eq!(removed, 0);

    let remaining = f
        .classes
        .list_schedules(&f.ctx, &class.class_id)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].day, 2);

    let err = f
        .schedules
        .clear_schedules(&f.ctx, "u1", &class.class_id, 7)
        .await
        .unwrap_err();
    assert!(matches!(err, ClassroomError::Validation(_)));
}

#[tokio::test]
async fn test_schedule_rules() {
    let f = Fixture::new().await;
    let class = f.class_owned_by_u1().await;
    f.add("u1", &class.class_id, "bob", None).await;

    assert_forbidden(
        f.schedules
            .create_schedule(&f.ctx, "u3", &class.class_id, schedule("x", 0))
            .await,
    );

    let err = f
        .schedules
        .create_schedule(
            &f.ctx,
            "u2",
            &class.class_id,
            CreateScheduleRequest {
                start_at: 86_400,
                ..schedule("x", 0)
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClassroomError::Validation(_)));

    let created = f
        .schedules
        .create_schedule(&f.ctx, "u2", &class.class_id, schedule("x", 0))
        .await
        .unwrap();
    assert_eq!(
        f.schedules
            .get_schedule(&f.ctx, &created.schedule_id)
            .await
            .unwrap(),
        created
    );

    assert_forbidden(
        f.schedules
            .clear_schedules(&f.ctx, "u2", &class.class_id, 0)
            .await,
    );
    assert_forbidden(
        f.schedules
            .delete_schedule(&f.ctx, "u2", &created.schedule_id)
            .await,
    );
    f.schedules
        .delete_schedule(&f.ctx, "u1", &created.schedule_id)
        .await
        .unwrap();
    assert!(
        f.schedules
            .get_schedules(&f.ctx, &class.class_id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_user_profile_statistics() {
    let f = Fixture::new().await;
    let class = f.class_owned_by_u1().await;
    f.add("u1", &class.class_id, "bob", None).await;

    let profile = f.users.get_user_profile_by_id(&f.ctx, "u1").await.unwrap();
    assert_eq!(profile.user_statistics.owned_class, 1);
    assert_eq!(profile.user_statistics.joined_class, 1);
    assert_eq!(profile.owned_class, vec![class.clone()]);

    let profile = f
        .users
        .get_user_profile_by_username(&f.ctx, "bob")
        .await
        .unwrap();
    assert_eq!(profile.user_statistics.owned_class, 0);
    assert_eq!(profile.user_statistics.joined_class, 1);

    let joined = f.users.get_user_joined_classes(&f.ctx, "u2").await.unwrap();
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].class_id, class.class_id);

    let err = f
        .users
        .get_user_profile_by_id(&f.ctx, "missing")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_user() {
    let f = Fixture::new().await;

    let updated = f
        .users
        .update_user(
            &f.ctx,
            "u1",
            UpdateUserRequest {
                username: Some("alice.w".to_string()),
                name: Some("Alice W".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.username, "alice.w");
    assert_eq!(updated.name, "Alice W");

    let err = f
        .users
        .update_user(
            &f.ctx,
            "u1",
            UpdateUserRequest {
                username: Some("bob".to_string()),
                name: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClassroomError::AlreadyExists(_)));

    let err = f
        .users
        .update_user(
            &f.ctx,
            "u1",
            UpdateUserRequest {
                username: Some(".bad".to_string()),
                name: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClassroomError::Validation(_)));
}

#[tokio::test]
async fn test_provision_user_once() {
    let f = Fixture::new().await;

    let created = f
        .users
        .get_or_provision(&f.ctx, "external-42", "new@example.com")
        .await
        .unwrap();
    assert_eq!(created.user_id, "external-42");
    assert_eq!(created.email, "new@example.com");
    assert_eq!(created.name, created.username);

    let again = f
        .users
        .get_or_provision(&f.ctx, "external-42", "new@example.com")
        .await
        .unwrap();
    assert_eq!(again, created);

    let existing = f
        .users
        .get_or_provision(&f.ctx, "u1", "alice@example.com")
        .await
        .unwrap();
    assert_eq!(existing.username, "alice");
}

#[tokio::test]
async fn test_cancelled_context_aborts_without_mutation() {
    let f = Fixture::new().await;
    let cancelled = RequestContext::background();
    cancelled.cancel();

    let err = f
        .classes
        .create_class(
            &cancelled,
            "u1",
            CreateClassRequest {
                name: "ghost".to_string(),
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ClassroomError::Cancelled(_)));

    assert!(
        f.storage
            .get_classes_by_owner_id(&f.ctx, "u1")
            .await
            .unwrap()
            .is_empty()
    );
}
