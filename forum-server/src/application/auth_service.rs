use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use tracing::info;

use crate::data::role_repository::RoleRepository;
use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::role::RoleName;
use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::infrastructure::jwt::JwtService;

pub(crate) const REGISTERED_MESSAGE: &str = "User registered successfully.";

#[derive(Debug, Clone)]
pub(crate) struct AuthResult {
    pub(crate) user: User,
    pub(crate) access_token: String,
}

pub(crate) struct AuthService<U: UserRepository, R: RoleRepository> {
    users: U,
    roles: R,
    jwt: JwtService,
}

impl<U: UserRepository, R: RoleRepository> AuthService<U, R> {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(users: U, roles: R, jwt: JwtService) -> Self {
        Self { users, roles, jwt }
    }

    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<String, DomainError> {
        let req = req.validate()?;

        if self.users.exists_by_username(&req.username).await? {
            return Err(DomainError::AlreadyExists("username".to_string()));
        }
        if self.users.exists_by_email(&req.email).await? {
            return Err(DomainError::AlreadyExists("email".to_string()));
        }

        let default_role = self
            .roles
            .find_by_name(RoleName::User.as_str())
            .await?
            .ok_or_else(|| {
                DomainError::Configuration(format!(
                    "Role '{}' is missing. Please restart the server to seed it.",
                    RoleName::User.as_str()
                ))
            })?;

        let password_hash = self.hash_password(&req.password)?;
        let new_user = NewUser {
            name: req.name,
            username: req.username,
            email: req.email,
            password_hash,
            role_ids: vec![default_role.id],
        };
        let user = self.users.create_user(new_user).await?;
        info!(user_id = user.id, username = %user.username, "user registered");

        Ok(REGISTERED_MESSAGE.to_string())
    }

    pub(crate) async fn login(&self, req: LoginRequest) -> Result<AuthResult, DomainError> {
        let req = req.validate()?;

        let user_creds = match self
            .users
            .find_by_username_or_email(&req.username_or_email)
            .await?
        {
            Some(user_creds) => user_creds,
            None => {
                // keep the response time close to the found-user path
                match self.verify_password(&req.password, Self::DUMMY_PASSWORD_HASH) {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                return Err(DomainError::InvalidCredentials);
            }
        };

        self.verify_password(&req.password, &user_creds.password_hash)?;

        let user = user_creds.user;
        let access_token = self
            .jwt
            .generate_token(user.id, &user.username, &user.roles)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;

        Ok(AuthResult { user, access_token })
    }

    pub(crate) async fn profile(&self, username: &str) -> Result<User, DomainError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user username: {username}")))
    }

    pub(crate) fn hash_password(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        &self,
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })?;

        Ok(())
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}
