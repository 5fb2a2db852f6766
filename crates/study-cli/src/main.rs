use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use sqlx::PgPool;
use study_cli::admin;
use study_cli::seeder::{self, Curriculum, Enrollment, SeedConfig};
use study_config::DatabaseConfig;

#[derive(Parser)]
#[command(name = "study-cli")]
#[command(about = "Study CLI - Administrative tools for the Study API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account with staff rights
    CreateAdmin {
        /// Login name
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// First name of the administrator
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the administrator
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake subjects, tutors, courses, groups and students
    Seed {
        /// Number of subjects to create
        #[arg(long, default_value = "12")]
        subjects: usize,

        /// Number of tutors to create
        #[arg(long, default_value = "4")]
        tutors: usize,

        /// Number of courses to create
        #[arg(short = 'c', long, default_value = "6")]
        courses: usize,

        /// Number of subjects attached to each course
        #[arg(long, default_value = "4")]
        subjects_per_course: usize,

        /// Number of study groups per course
        #[arg(long, default_value = "2")]
        groups: usize,

        /// Number of students per study group
        #[arg(long, default_value = "20")]
        students: usize,

        /// Password shared by all seeded accounts
        #[arg(long, default_value = "password123")]
        password: String,
    },
    /// Print the credential key of an existing user
    IssueToken {
        /// Login name of the user
        #[arg(short = 'u', long)]
        username: String,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let pool = study_db::init_db_pool(&DatabaseConfig::from_env()).await;

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            username,
            first_name,
            last_name,
            password,
        } => handle_create_admin(&pool, username, first_name, last_name, password).await,
        Commands::Seed {
            subjects,
            tutors,
            courses,
            subjects_per_course,
            groups,
            students,
            password,
        } => {
            let config = SeedConfig::new(password)
                .with_curriculum(Curriculum {
                    subjects,
                    courses,
                    subjects_per_course,
                })
                .with_enrollment(Enrollment {
                    tutors,
                    groups_per_course: groups,
                    students_per_group: students,
                });
            handle_seed(&pool, config).await
        }
        Commands::IssueToken { username } => handle_issue_token(&pool, &username).await,
    }
}

fn prompt(label: &str) -> String {
    match Input::new().with_prompt(label).interact_text() {
        Ok(value) => value,
        Err(e) => {
            eprintln!("\n❌ Failed to read {}: {}", label.to_lowercase(), e);
            std::process::exit(1);
        }
    }
}

async fn handle_create_admin(
    pool: &PgPool,
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    password: Option<String>,
) {
    let username = username.unwrap_or_else(|| prompt("Username"));
    let first_name = first_name.unwrap_or_else(|| prompt("First name"));
    let last_name = last_name.unwrap_or_else(|| prompt("Last name"));

    let password = password.unwrap_or_else(|| {
        match Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
        {
            Ok(password) => password,
            Err(e) => {
                eprintln!("\n❌ Failed to read password: {}", e);
                std::process::exit(1);
            }
        }
    });

    match admin::create_admin(pool, &username, &first_name, &last_name, &password).await {
        Ok((user_id, key)) => {
            println!("\n✅ Administrator created successfully!");
            println!("   Id: {}", user_id);
            println!("   Username: {}", username);
            println!("   Name: {} {}", first_name, last_name);
            println!("   Token: {}", key);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating administrator: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, config: SeedConfig) {
    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\n❌ Error seeding database: {}", e);
        std::process::exit(1);
    }
}

async fn handle_issue_token(pool: &PgPool, username: &str) {
    match admin::issue_token(pool, username).await {
        Ok(Some(key)) => println!("{}", key),
        Ok(None) => {
            eprintln!("❌ No user named '{}'", username);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("\n❌ Error issuing token: {}", e);
            std::process::exit(1);
        }
    }
}
