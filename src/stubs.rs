//! Template files shipped inside the binary

use installer::Template;

macro_rules! stub {
    ($name:literal) => {
        Template {
            name: $name,
            contents: include_str!(concat!("../stubs/", $name)),
        }
    };
}

pub const PROJECT_CONFIG: Template = stub!("config/project.stub");
pub const PHPSTAN: Template = stub!("phpstan.stub");

pub const PEST: Template = stub!("tests/pest.stub");
pub const ARCHITECTURE_TEST: Template = stub!("tests/architecture-test.stub");
pub const UNIT_EXAMPLE_TEST: Template = stub!("tests/Unit/example-test.stub");
pub const FEATURE_EXAMPLE_TEST: Template = stub!("tests/Feature/example-test.stub");

pub const PINT: Template = stub!("pint.stub");
pub const TLINT: Template = stub!("tlint.stub");
pub const DUSTER: Template = stub!("duster.stub");
pub const DUSTER_WITH_PRETTIER: Template = stub!("duster-with-prettier.stub");

pub const PRETTIERRC: Template = stub!(".prettierrc.stub");
pub const PRETTIERIGNORE: Template = stub!(".prettierignore.stub");

pub const WORKFLOW_CHECKS: Template = stub!("workflows/checks.stub");
pub const WORKFLOW_DEPLOYER: Template = stub!("workflows/deployer.stub");

pub const UPDATES_MIGRATION: Template = stub!("database/create_database_updates_table.stub");
/// Body of a newly generated update script
pub const DATABASE_UPDATE: Template = stub!("database/database_update.stub");
