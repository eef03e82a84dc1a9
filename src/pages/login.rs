use crate::client::ClientError;
use crate::pages::{ActionResult, FailureText, PageContext};
use crate::ui::{PageId, TextInput, Toggle};

const LOGIN_FAILURE: FailureText = FailureText::new("Unknown issue!", "Login failed");

#[derive(Clone, Default, Debug)]
pub struct LoginControls {
    pub username: TextInput,
    pub password: TextInput,
    pub logout_button: Toggle,
}

pub struct LoginPage {
    context: PageContext,
    controls: LoginControls,
}

impl LoginPage {
    pub fn new(context: PageContext, controls: LoginControls) -> Self {
        Self { context, controls }
    }

    pub fn controls(&self) -> &LoginControls {
        &self.controls
    }

    pub fn load(&self) {
        self.controls
            .logout_button
            .set_visible(self.context.session().has_token());
    }

    pub async fn login(&self) -> ActionResult {
        let result = self.try_login().await;
        let succeeded = result.is_ok();
        let outcome = self.context.finish(result, LOGIN_FAILURE);
        if succeeded {
            self.context.navigator.navigate(PageId::Recipes);
        }
        outcome
    }

    async fn try_login(&self) -> Result<String, ClientError> {
        let username = self.controls.username.required("username")?;
        let password = self.controls.password.required("password")?;

        let reply = self.context.client.login(&username, &password).await?;
        self.controls.password.clear();
        self.controls.logout_button.set_visible(true);

        Ok(if reply.is_admin {
            format!("Logged in as {} (admin)", username)
        } else {
            format!("Logged in as {}", username)
        })
    }

    pub async fn logout(&self) -> ActionResult {
        self.context.logout().await
    }
}
