use crate::client::ClientError;
use crate::pages::{ActionResult, FailureText, PageContext};
use crate::ui::{PageId, TextInput};

const REGISTER_FAILURE: FailureText = FailureText::new("Registration failed", "Registration error");

#[derive(Clone, Default, Debug)]
pub struct RegisterControls {
    pub username: TextInput,
    pub email: TextInput,
    pub password: TextInput,
    pub repeat_password: TextInput,
}

pub struct RegisterPage {
    context: PageContext,
    controls: RegisterControls,
}

impl RegisterPage {
    pub fn new(context: PageContext, controls: RegisterControls) -> Self {
        Self { context, controls }
    }

    pub fn controls(&self) -> &RegisterControls {
        &self.controls
    }

    pub async fn register(&self) -> ActionResult {
        let result = self.try_register().await;
        let succeeded = result.is_ok();
        let outcome = self.context.finish(result, REGISTER_FAILURE);
        if succeeded {
            self.context.navigator.navigate(PageId::Login);
        }
        outcome
    }

    async fn try_register(&self) -> Result<String, ClientError> {
        let username = self.controls.username.required("username")?;
        let email = self.controls.email.required("email")?;
        let password = self.controls.password.required("password")?;
        let repeat_password = self.controls.repeat_password.required("repeat password")?;

        if password != repeat_password {
            return Err(ClientError::invalid_input("Passwords do not match"));
        }

        self.context
            .client
            .register(&username, &email, &password)
            .await?;

        Ok(format!("Account {} created, please log in", username))
    }
}
