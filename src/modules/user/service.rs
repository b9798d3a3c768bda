use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    configs::TokenSettings,
    modules::user::{
        model::{InsertUser, SignInModel, SignInResponse, SignUpModel, UserResponse},
        repository::UserRepository,
    },
    utils::{hash_password, verify_password, Claims},
};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository + Send + Sync>,
    tokens: TokenSettings,
}

impl UserService {
    pub fn with_dependencies(
        repo: Arc<dyn UserRepository + Send + Sync>,
        tokens: TokenSettings,
    ) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo, tokens }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UserResponse, error::SystemError> {
        self.repo
            .find_by_id(&id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| error::SystemError::not_found("User not found"))
    }

    pub async fn sign_up(&self, user: SignUpModel) -> Result<Uuid, error::SystemError> {
        let hash_password = hash_password(&user.password)?;

        let new_user = InsertUser {
            username: user.username,
            email: user.email.to_lowercase(),
            hash_password,
            first_name: user.first_name,
            last_name: user.last_name,
        };

        let user_id = self.repo.create(&new_user).await?;
        info!("User {} signed up", user_id);
        Ok(user_id)
    }

    pub async fn sign_in(&self, user: SignInModel) -> Result<SignInResponse, error::SystemError> {
        let user_entity = self
            .repo
            .find_by_email(&user.email)
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("Invalid email or password"))?;

        let valid = verify_password(&user_entity.hash_password, &user.password)?;
        if !valid {
            return Err(error::SystemError::unauthorized("Invalid email or password"));
        }

        let access_token = Claims::new(&user_entity.id, self.tokens.access_token_expiration)
            .encode(self.tokens.secret.as_bytes())?;

        Ok(SignInResponse { access_token, user: UserResponse::from(user_entity) })
    }
}
