//! CLI command definitions.

use crate::constants::DEFAULT_CREATE_TIMEOUT_MINS;
use crate::output::OutputFormat;
use crate::styles::styles;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const CLI_EXAMPLES: &str = "\
Examples:
  heat stack-list                                  List stacks
  heat stack-create web -f web.yaml -P key=heat    Create a stack from a local template
  heat stack-create web -u http://x/web.yaml -e env.yaml
                                                   Create from a URL with an environment
  heat stack-show web                              Show stack details
  heat event-list web -r server                    List events of one resource";

const STACK_CREATE_EXAMPLES: &str = "\
Examples:
  heat stack-create web -f web.yaml                        From a local template
  heat stack-create web -u http://x/web.yaml               From a template URL
  heat stack-create web -o http://swift/v1/c/web.json      From an object store
  heat stack-create web -f web.yaml -e env.yaml            With an environment
  heat stack-create web -f web.yaml -P \"a=1;b=2\" -P c=3    With parameters
  heat stack-create web -f web.yaml -c 30 -r               30 minute timeout, rollback on";

const TEMPLATE_VALIDATE_EXAMPLES: &str = "\
Examples:
  heat template-validate -f web.yaml                 Validate a local template
  heat template-validate -f web.yaml -e env.yaml     Validate with an environment";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Heat CLI - Manage orchestration stacks.
#[derive(Debug, Parser)]
#[command(name = "heat", author, version, styles=styles())]
#[command(about = "Command-line client for the Heat orchestration API", after_help = CLI_EXAMPLES)]
pub struct Cli {
    /// Connection and logging options.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Orchestration API endpoint [env: HEAT_URL].
    #[arg(long, global = true, value_name = "URL")]
    pub heat_url: Option<String>,

    /// Auth token sent with every request [env: OS_AUTH_TOKEN].
    #[arg(long, global = true, value_name = "TOKEN")]
    pub os_auth_token: Option<String>,

    /// HTTP request timeout in seconds. Unset means no limit [env: HEAT_TIMEOUT].
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Accept invalid TLS certificates.
    #[arg(short = 'k', long, global = true)]
    pub insecure: bool,

    /// Print debug logs.
    #[arg(short, long, global = true)]
    pub debug: bool,
}

/// Template, environment and parameter options shared by create, update and validate.
#[derive(Debug, Clone, Default, Args)]
pub struct TemplateArgs {
    /// Path to the template.
    #[arg(short = 'f', long, value_name = "FILE")]
    pub template_file: Option<PathBuf>,

    /// Path to the environment.
    #[arg(short = 'e', long, value_name = "FILE")]
    pub environment_file: Option<PathBuf>,

    /// URL of template.
    #[arg(short = 'u', long, value_name = "URL")]
    pub template_url: Option<String>,

    /// URL to retrieve template object (e.g. from swift).
    #[arg(short = 'o', long, value_name = "URL")]
    pub template_object: Option<String>,

    /// Parameter values. Repeatable, or once with pairs separated by semicolons.
    #[arg(short = 'P', long = "parameters", value_name = "KEY1=VALUE1;KEY2=VALUE2...")]
    pub parameters: Vec<String>,
}

/// Arguments of `stack-create`.
#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Stack creation timeout in minutes.
    #[arg(short = 'c', long, value_name = "TIMEOUT", default_value_t = DEFAULT_CREATE_TIMEOUT_MINS)]
    pub create_timeout: u32,

    /// Enable rollback on create/update failure.
    #[arg(short = 'r', long)]
    pub enable_rollback: bool,

    /// Name of the stack to create.
    #[arg(value_name = "STACK_NAME")]
    pub name: String,
}

/// Arguments of `stack-update`.
#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Name or ID of stack to update.
    #[arg(value_name = "NAME or ID")]
    pub id: String,
}

/// A single stack.
#[derive(Debug, Clone, Args)]
pub struct StackArgs {
    /// Name or ID of the stack.
    #[arg(value_name = "NAME or ID")]
    pub id: String,
}

/// A resource of a stack.
#[derive(Debug, Clone, Args)]
pub struct ResourceArgs {
    /// Name or ID of the stack.
    #[arg(value_name = "NAME or ID")]
    pub id: String,

    /// Name of the resource.
    #[arg(value_name = "RESOURCE")]
    pub resource: String,
}

/// An event of a stack resource.
#[derive(Debug, Clone, Args)]
pub struct EventArgs {
    /// Name or ID of the stack.
    #[arg(value_name = "NAME or ID")]
    pub id: String,

    /// Name of the resource the event belongs to.
    #[arg(value_name = "RESOURCE")]
    pub resource: String,

    /// ID of the event.
    #[arg(value_name = "EVENT")]
    pub event: String,
}

/// Available commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create the stack.
    #[command(after_help = STACK_CREATE_EXAMPLES)]
    StackCreate(CreateArgs),

    /// Update the stack.
    StackUpdate(UpdateArgs),

    /// Delete the stack.
    StackDelete(StackArgs),

    /// Describe the stack.
    StackShow(StackArgs),

    /// List the user's stacks.
    StackList,

    /// Get the template for the specified stack.
    TemplateShow(StackArgs),

    /// Validate a template with parameters.
    #[command(after_help = TEMPLATE_VALIDATE_EXAMPLES)]
    TemplateValidate(TemplateArgs),

    /// Show list of resources belonging to a stack.
    ResourceList(StackArgs),

    /// Describe the resource.
    ResourceShow(ResourceArgs),

    /// Generate a template based on a resource.
    ResourceTemplate {
        /// Name of the resource to generate a template for.
        #[arg(value_name = "RESOURCE")]
        resource: String,

        /// The template output format.
        #[arg(short = 'F', long, value_enum, value_name = "FORMAT")]
        format: Option<OutputFormat>,
    },

    /// List resource metadata.
    ResourceMetadata(ResourceArgs),

    /// List the available resource types.
    ResourceTypeList,

    /// Show the resource type.
    ResourceTypeShow {
        /// Resource type to get the details for.
        #[arg(value_name = "RESOURCE_TYPE")]
        resource_type: String,
    },

    /// List events for a stack.
    EventList {
        /// Name or ID of stack to show the events for.
        #[arg(value_name = "NAME or ID")]
        id: String,

        /// Name of the resource to filter events by.
        #[arg(short = 'r', long, value_name = "RESOURCE")]
        resource: Option<String>,
    },

    /// Describe the event.
    EventShow(EventArgs),

    /// Suspend the stack.
    ActionSuspend(StackArgs),

    /// Resume the stack.
    ActionResume(StackArgs),

    #[command(flatten)]
    Deprecated(DeprecatedCommand),
}

/// Deprecated command names.
#[derive(Debug, Clone, Subcommand)]
pub enum DeprecatedCommand {
    /// DEPRECATED! Use stack-create instead.
    Create(CreateArgs),

    /// DEPRECATED! Use stack-update instead.
    Update(UpdateArgs),

    /// DEPRECATED! Use stack-delete instead.
    Delete(StackArgs),

    /// DEPRECATED! Use stack-show instead.
    Describe(StackArgs),

    /// DEPRECATED! Use stack-list instead.
    List,

    /// DEPRECATED! Use template-show instead.
    Gettemplate(StackArgs),

    /// DEPRECATED! Use template-validate instead.
    Validate(TemplateArgs),

    /// DEPRECATED! Use resource-show instead.
    Resource(ResourceArgs),

    /// DEPRECATED! Use event-show instead.
    Event(EventArgs),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl DeprecatedCommand {
    /// The old and the replacement command names.
    pub fn names(&self) -> (&'static str, &'static str) {
        match self {
            DeprecatedCommand::Create(_) => ("create", "stack-create"),
            DeprecatedCommand::Update(_) => ("update", "stack-update"),
            DeprecatedCommand::Delete(_) => ("delete", "stack-delete"),
            DeprecatedCommand::Describe(_) => ("describe", "stack-show"),
            DeprecatedCommand::List => ("list", "stack-list"),
            DeprecatedCommand::Gettemplate(_) => ("gettemplate", "template-show"),
            DeprecatedCommand::Validate(_) => ("validate", "template-validate"),
            DeprecatedCommand::Resource(_) => ("resource", "resource-show"),
            DeprecatedCommand::Event(_) => ("event", "event-show"),
        }
    }

    /// The command this alias forwards to.
    pub fn into_current(self) -> Command {
        match self {
            DeprecatedCommand::Create(args) => Command::StackCreate(args),
            DeprecatedCommand::Update(args) => Command::StackUpdate(args),
            DeprecatedCommand::Delete(args) => Command::StackDelete(args),
            DeprecatedCommand::Describe(args) => Command::StackShow(args),
            DeprecatedCommand::List => Command::StackList,
            DeprecatedCommand::Gettemplate(args) => Command::TemplateShow(args),
            DeprecatedCommand::Validate(args) => Command::TemplateValidate(args),
            DeprecatedCommand::Resource(args) => Command::ResourceShow(args),
            DeprecatedCommand::Event(args) => Command::EventShow(args),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
