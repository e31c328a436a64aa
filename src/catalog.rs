//! The installable features, in installation order

use crate::stubs;
use chrono::NaiveDateTime;
use installer::{
    FeatureDetector, SelectOption, StubMapping, Step, WorkspaceContext, file_name_contains,
    path_exists,
};

/// Marker file name fragment of the ledger table migration
const MIGRATION_MARKER: &str = "create_database_updates_table";

const WORKFLOW_OPTIONS: &[SelectOption] = &[
    SelectOption {
        key: "none",
        label: "No workflows",
    },
    SelectOption {
        key: "checks",
        label: "Setup checks only",
    },
    SelectOption {
        key: "deployer",
        label: "Setup checks and deployer",
    },
];

/// Build the step catalog for a workspace.
///
/// `now` stamps the ledger migration published by the DB updates step.
pub fn steps(ctx: &WorkspaceContext, now: NaiveDateTime) -> Vec<Step> {
    vec![
        Step::new("config", "Project config")
            .stub(stubs::PROJECT_CONFIG, ctx.config("project.php")),
        Step::new("larastan", "Larastan")
            .announce_installed()
            .run(r#"composer require --dev "larastan/larastan:^2.0""#)
            .stub(stubs::PHPSTAN, ctx.base("phpstan.neon")),
        Step::new("pest", "Pest")
            .announce_installed()
            .pipeline(
                [
                    "composer remove phpunit/phpunit",
                    "composer require pestphp/pest --dev --with-all-dependencies",
                    "./vendor/bin/pest --init",
                ],
                false,
            )
            .stub(stubs::PEST, ctx.base("tests/Pest.php"))
            .stub(stubs::ARCHITECTURE_TEST, ctx.base("tests/ArchitectureTest.php"))
            .stub(stubs::UNIT_EXAMPLE_TEST, ctx.base("tests/Unit/ExampleTest.php"))
            .stub(stubs::FEATURE_EXAMPLE_TEST, ctx.base("tests/Feature/ExampleTest.php")),
        Step::new("duster", "Duster")
            .announce_installed()
            .run("composer require tightenco/duster --dev")
            .stub(stubs::PINT, ctx.base("pint.json"))
            .stub(stubs::TLINT, ctx.base("tlint.json"))
            .stub(stubs::DUSTER, ctx.base("duster.json")),
        Step::new("tailwind", "TailwindCSS")
            .confirm("Would you like install Tailwind CSS?", true)
            .ask_reinstall()
            .pipeline(
                [
                    "npm install -D tailwindcss postcss autoprefixer",
                    "npx tailwindcss init -p",
                ],
                true,
            ),
        Step::new("filament", "Filament")
            .confirm("Would you like install Filament?", true)
            .ask_reinstall()
            .pipeline(
                [
                    r#"composer require filament/filament:"^3.2" -W"#,
                    "php artisan filament:install --panels",
                ],
                true,
            ),
        db_updates(ctx, now),
        Step::new("prettier", "Prettier")
            .confirm("Would you like install Prettier?", true)
            .ask_reinstall()
            .pipeline(
                ["npm install -D prettier@^3.4.2 prettier-plugin-blade prettier-plugin-tailwindcss@^0.6.10"],
                true,
            )
            .stub(stubs::DUSTER_WITH_PRETTIER, ctx.base("duster.json"))
            .stub(stubs::PRETTIERRC, ctx.base(".prettierrc"))
            .stub(stubs::PRETTIERIGNORE, ctx.base(".prettierignore")),
        Step::new("github_actions", "GitHub Actions")
            .select(
                "Would you like to setup a GitHub Actions workflows?",
                WORKFLOW_OPTIONS.to_vec(),
                "none",
                "none",
            )
            .ask_reinstall()
            .stub_for("checks", stubs::WORKFLOW_CHECKS, ctx.base(".github/workflows/ci.yml"))
            .stub_for(
                "deployer",
                stubs::WORKFLOW_DEPLOYER,
                ctx.base(".github/workflows/ci.yml"),
            ),
    ]
}

/// Publish the ledger migration, then run exactly that migration
fn db_updates(ctx: &WorkspaceContext, now: NaiveDateTime) -> Step {
    let file = format!(
        "{}_{MIGRATION_MARKER}.php",
        now.format(updates::TIMESTAMP_FORMAT)
    );
    let destination = ctx.database("migrations").join(&file);

    let migrate = match destination.strip_prefix(&ctx.base_path) {
        Ok(rel) => format!("php artisan migrate --path={}", rel.display()),
        Err(_) => format!(
            "php artisan migrate --realpath --path={}",
            destination.display()
        ),
    };

    Step::new("db_updates", "DB updates")
        .confirm("Would you like install DB updates?", true)
        .publish_first(vec![StubMapping::new(stubs::UPDATES_MIGRATION, destination)])
        .run(migrate)
}

/// Marker checks for every catalog feature
pub fn detector(ctx: WorkspaceContext) -> FeatureDetector {
    FeatureDetector::new(ctx)
        .with("config", path_exists(|ctx| ctx.config("project.php")))
        .with("larastan", path_exists(|ctx| ctx.base("vendor/larastan/larastan")))
        .with("pest", path_exists(|ctx| ctx.base("vendor/pestphp/pest")))
        .with("duster", path_exists(|ctx| ctx.base("vendor/tightenco/duster")))
        .with("tailwind", path_exists(|ctx| ctx.base("node_modules/tailwindcss")))
        .with("filament", path_exists(|ctx| ctx.base("vendor/filament/filament")))
        .with(
            "db_updates",
            file_name_contains(|ctx| ctx.database("migrations"), MIGRATION_MARKER),
        )
        .with("prettier", path_exists(|ctx| ctx.base(".prettierrc")))
        .with(
            "github_actions",
            path_exists(|ctx| ctx.base(".github/workflows/ci.yml")),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use installer::{
        AcceptDefaults, Action, CommandOutput, CommandRunner, Engine, Gate, NoCommit, NoReport,
        StepOutcome,
    };
    use std::fs;
    use tempfile::TempDir;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    struct Succeed;

    impl CommandRunner for Succeed {
        fn run(&self, command: &str, _sink: &mut dyn FnMut(&str)) -> CommandOutput {
            CommandOutput::ok(command)
        }
    }

    /// Fails every `php artisan migrate` invocation
    struct MigrateFails;

    impl CommandRunner for MigrateFails {
        fn run(&self, command: &str, _sink: &mut dyn FnMut(&str)) -> CommandOutput {
            if command.starts_with("php artisan migrate") {
                CommandOutput::failed("SQLSTATE[HY000]: unable to open database file\n")
            } else {
                CommandOutput::ok(command)
            }
        }
    }

    #[test]
    fn test_catalog_order() {
        let ctx = WorkspaceContext::new("/srv/app");
        let ids: Vec<_> = steps(&ctx, now()).into_iter().map(|s| s.id).collect();

        assert_eq!(
            ids,
            vec![
                "config",
                "larastan",
                "pest",
                "duster",
                "tailwind",
                "filament",
                "db_updates",
                "prettier",
                "github_actions",
            ]
        );
    }

    #[test]
    fn test_every_step_has_a_detector() {
        let ctx = WorkspaceContext::new("/srv/app");
        let detector = detector(ctx.clone());
        let registered: Vec<_> = detector.ids().collect();

        for step in steps(&ctx, now()) {
            assert!(registered.contains(&step.id.as_str()), "{}", step.id);
        }
    }

    #[test]
    fn test_commit_messages() {
        let ctx = WorkspaceContext::new("/srv/app");
        let messages: Vec<_> = steps(&ctx, now())
            .into_iter()
            .map(|s| s.commit_message)
            .collect();

        assert_eq!(
            messages,
            vec![
                "Add Project config",
                "Add Larastan",
                "Add Pest",
                "Add Duster",
                "Add TailwindCSS",
                "Add Filament",
                "Add DB updates",
                "Add Prettier",
                "Add GitHub Actions",
            ]
        );
    }

    #[test]
    fn test_db_updates_migrates_published_file() {
        let ctx = WorkspaceContext::new("/srv/app");
        let step = db_updates(&ctx, now());

        let file = "2025_03_01_100000_create_database_updates_table.php";
        assert_eq!(
            step.actions[1],
            Action::Run {
                command: format!("php artisan migrate --path=database/migrations/{file}"),
                stream: false,
            }
        );
        match &step.actions[0] {
            Action::Publish(stubs) => {
                assert_eq!(
                    stubs[0].destination,
                    ctx.database("migrations").join(file)
                );
            }
            other => panic!("unexpected first action: {other:?}"),
        }
    }

    #[test]
    fn test_db_updates_outside_base_uses_realpath() {
        let ctx = WorkspaceContext::new("/srv/app").with_database_path("/var/db");
        let step = db_updates(&ctx, now());

        match &step.actions[1] {
            Action::Run { command, .. } => assert!(command.starts_with(
                "php artisan migrate --realpath --path=/var/db/migrations/"
            )),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_workflow_select_defaults_to_none() {
        let ctx = WorkspaceContext::new("/srv/app");
        let github = steps(&ctx, now()).pop().unwrap();

        match github.gate {
            Gate::Select { default, skip, .. } => {
                assert_eq!(default, "none");
                assert_eq!(skip, "none");
            }
            other => panic!("unexpected gate: {other:?}"),
        }
    }

    #[test]
    fn test_markers() {
        let tmp = TempDir::new().unwrap();
        let ctx = WorkspaceContext::new(tmp.path());
        let detector = detector(ctx.clone());

        assert!(!detector.is_installed("pest"));
        fs::create_dir_all(ctx.base("vendor/pestphp/pest")).unwrap();
        assert!(detector.is_installed("pest"));

        assert!(!detector.is_installed("config"));
        fs::create_dir_all(&ctx.config_path).unwrap();
        fs::write(ctx.config("project.php"), "<?php").unwrap();
        assert!(detector.is_installed("config"));
    }

    #[test]
    fn test_default_run_on_fresh_workspace() {
        let tmp = TempDir::new().unwrap();
        let ctx = WorkspaceContext::new(tmp.path());
        let detector = detector(ctx.clone());

        let summary = Engine::new(&detector, &Succeed, &NoCommit)
            .run(&steps(&ctx, now()), &mut AcceptDefaults, &mut NoReport)
            .unwrap();

        assert!(summary.is_success());
        assert_eq!(summary.outcome("github_actions"), Some(&StepOutcome::Declined));
        assert_eq!(summary.committed(), 8);
        assert!(ctx.config("project.php").exists());
        assert!(ctx.base("tests/Feature/ExampleTest.php").exists());
        assert!(ctx.base(".prettierrc").exists());
        assert!(!ctx.base(".github/workflows/ci.yml").exists());
        assert_eq!(
            fs::read_to_string(ctx.base("duster.json")).unwrap(),
            stubs::DUSTER_WITH_PRETTIER.contents
        );
        assert!(detector.is_installed("db_updates"));
    }

    #[test]
    fn test_second_run_skips_installed_features() {
        let tmp = TempDir::new().unwrap();
        let ctx = WorkspaceContext::new(tmp.path());
        let detector = detector(ctx.clone());
        let catalog = steps(&ctx, now());
        let engine = Engine::new(&detector, &Succeed, &NoCommit);

        engine.run(&catalog, &mut AcceptDefaults, &mut NoReport).unwrap();
        let again = engine.run(&catalog, &mut AcceptDefaults, &mut NoReport).unwrap();

        assert_eq!(again.outcome("config"), Some(&StepOutcome::Skipped));
        assert_eq!(again.outcome("db_updates"), Some(&StepOutcome::Skipped));
        assert_eq!(again.outcome("prettier"), Some(&StepOutcome::Skipped));
    }

    #[test]
    fn test_failed_migration_is_retried_next_run() {
        let tmp = TempDir::new().unwrap();
        let ctx = WorkspaceContext::new(tmp.path());
        let detector = detector(ctx.clone());
        let catalog = steps(&ctx, now());

        let first = Engine::new(&detector, &MigrateFails, &NoCommit)
            .run(&catalog, &mut AcceptDefaults, &mut NoReport)
            .unwrap();
        assert!(first.outcome("db_updates").unwrap().is_failure());
        assert!(!detector.is_installed("db_updates"));

        let second = Engine::new(&detector, &MigrateFails, &NoCommit)
            .run(&catalog, &mut AcceptDefaults, &mut NoReport)
            .unwrap();
        assert!(second.outcome("db_updates").unwrap().is_failure());

        let third = Engine::new(&detector, &Succeed, &NoCommit)
            .run(&catalog, &mut AcceptDefaults, &mut NoReport)
            .unwrap();
        assert_eq!(third.outcome("db_updates"), Some(&StepOutcome::Committed));
        assert!(detector.is_installed("db_updates"));
    }
}
