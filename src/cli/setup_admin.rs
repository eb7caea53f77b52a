use crate::coordinators::{SetupAdminCoordinator, SetupAdminOutcome};
use crate::services::crypto::generate_secure_password;
use crate::types::internal::RoleInsert;

/// Ensure an admin account from the command line
///
/// Skips the setup key; running the binary already implies server access.
pub async fn setup_admin(
    coordinator: &SetupAdminCoordinator,
    email: &str,
    password: Option<String>,
) -> Result<SetupAdminOutcome, Box<dyn std::error::Error>> {
    let (password, generated) = match password {
        Some(password) => (password, false),
        None => (generate_secure_password(), true),
    };

    println!("\n=== VersoForms Admin Setup ===\n");

    let outcome = coordinator.ensure_admin(email, &password).await?;

    match &outcome {
        SetupAdminOutcome::Created { user_id } => {
            println!("✓ {}", outcome.message());
            println!("  Email:   {}", email);
            println!("  User ID: {}", user_id);
            if generated {
                println!("  Password: {}", password);
                println!("\n⚠️  Store this password now; it will not be shown again.");
            }
        }
        SetupAdminOutcome::Ensured { user_id, role } => {
            println!("✓ {}", outcome.message());
            println!("  User ID: {}", user_id);
            if *role == RoleInsert::AlreadyPresent {
                println!("  The account already had the admin role.");
            }
            if generated {
                println!("  Existing password left unchanged.");
            }
        }
    }

    Ok(outcome)
}
