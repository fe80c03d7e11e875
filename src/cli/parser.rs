use crate::core::employee::EmployeeForm;
use crate::core::position::PositionForm;
use crate::core::timesheet::TimesheetForm;
use crate::core::user::UserForm;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rPayroll
/// CLI payroll manager: employees, timesheets, deductions and payroll runs on SQLite
#[derive(Parser)]
#[command(
    name = "rpayroll",
    version = env!("CARGO_PKG_VERSION"),
    about = "A payroll manager CLI: employees, timesheets, deductions and payroll runs on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Username to authenticate with
    #[arg(global = true, long = "user", env = "RPAYROLL_USER")]
    pub user: Option<String>,

    /// Password to authenticate with
    #[arg(
        global = true,
        long = "password",
        env = "RPAYROLL_PASSWORD",
        hide_env_values = true
    )]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init {
        #[arg(
            long = "admin-user",
            requires = "admin_password",
            help = "Create a bootstrap Admin account with this username"
        )]
        admin_user: Option<String>,

        #[arg(
            long = "admin-password",
            requires = "admin_user",
            help = "Password of the bootstrap Admin account"
        )]
        admin_password: Option<String>,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Zip the backup")]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Export payroll summaries
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Only payrolls of this employee")]
        employee: Option<i64>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Check credentials and show the session
    Login,

    /// Create an Employee account for an existing employee (no login needed)
    Register {
        employee_id: String,

        username: String,

        #[arg(id = "account_password", value_name = "PASSWORD")]
        password: String,
    },

    /// Employee records
    Employee {
        #[command(subcommand)]
        action: EmployeeCmd,
    },

    /// Department records
    Department {
        #[command(subcommand)]
        action: DepartmentCmd,
    },

    /// Position records
    Position {
        #[command(subcommand)]
        action: PositionCmd,
    },

    /// Timesheet records
    Timesheet {
        #[command(subcommand)]
        action: TimesheetCmd,
    },

    /// Deduction templates
    Deduction {
        #[command(subcommand)]
        action: DeductionCmd,
    },

    /// Generate, inspect and delete payroll runs
    Payroll {
        #[command(subcommand)]
        action: PayrollCmd,
    },

    /// Admin and employee accounts
    User {
        #[command(subcommand)]
        action: UserCmd,
    },

    /// Search every record table for a term
    Search { term: String },

    /// Your own profile, timesheets and payrolls
    Me {
        #[command(subcommand)]
        action: MeCmd,

        #[arg(long, global = true, help = "Employee to view (admins only)")]
        employee: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCmd {
    /// List employees
    List {
        #[arg(long, help = "Match id, last name or first name")]
        filter: Option<String>,
    },
    /// Show one employee
    Show { id: i64 },
    /// Add an employee
    Add {
        #[command(flatten)]
        form: EmployeeForm,
    },
    /// Edit an employee (only the given fields change; an empty value clears)
    Edit {
        id: i64,
        #[command(flatten)]
        form: EmployeeForm,
    },
    /// Delete an employee
    Del {
        id: i64,
        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum DepartmentCmd {
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    Add {
        #[arg(long)]
        name: String,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: String,
    },
    Del {
        id: i64,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum PositionCmd {
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    Add {
        #[command(flatten)]
        form: PositionForm,
    },
    Edit {
        id: i64,
        #[command(flatten)]
        form: PositionForm,
    },
    Del {
        id: i64,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum TimesheetCmd {
    List {
        #[arg(long)]
        employee: Option<i64>,
    },
    Add {
        #[command(flatten)]
        form: TimesheetForm,
    },
    Edit {
        id: i64,
        #[command(flatten)]
        form: TimesheetForm,
    },
    Del {
        id: i64,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum DeductionCmd {
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    Add {
        #[arg(long)]
        description: String,
        #[arg(long = "amount")]
        default_amount: String,
    },
    Edit {
        id: i64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "amount")]
        default_amount: Option<String>,
    },
    Del {
        id: i64,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum PayrollCmd {
    /// Create a payroll run for an employee and cut-off range
    Generate {
        #[arg(long)]
        employee: String,
        #[arg(long, help = "Start cut-off (YYYY-MM-DD)")]
        start: String,
        #[arg(long, help = "End cut-off (YYYY-MM-DD)")]
        end: String,
    },
    /// List payrolls with totals
    List {
        #[arg(long)]
        employee: Option<i64>,
    },
    /// Show one payroll and its deductions
    Show { id: i64 },
    /// Delete a payroll and its deductions
    Del {
        id: i64,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum UserCmd {
    List {
        #[arg(long, help = "admin or employee")]
        role: Option<String>,
    },
    Add {
        #[command(flatten)]
        form: UserForm,
    },
    Edit {
        id: i64,
        #[command(flatten)]
        form: UserForm,
    },
    Del {
        id: i64,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum MeCmd {
    Profile,
    Timesheets,
    Payrolls,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
