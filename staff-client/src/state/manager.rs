//! EmployeeManager - 执行请求并把结果派发给 AppState

use shared::ErrorCode;
use shared::models::{Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate};
use tokio::time::Instant;

use super::form::EMAIL_TAKEN_MESSAGE;
use super::{Action, AppState, FormField};
use crate::{ClientConfig, ClientError, ClientResult, EmployeeApi, HttpClient};

pub const CONNECT_FAILED_BANNER: &str = "Failed to connect to server. Please refresh the page.";
pub const CREATED_MESSAGE: &str = "Employee created successfully!";
pub const UPDATED_MESSAGE: &str = "Employee updated successfully!";
pub const DELETED_MESSAGE: &str = "Employee deleted successfully!";
pub const STATUS_UPDATED_MESSAGE: &str = "Employee status updated successfully!";

/// 员工管理器
///
/// 持有状态与接口；所有修改经由 [`AppState::apply`]。
/// 方法需要 `&mut self`，同一时刻只会有一个请求在途。
pub struct EmployeeManager<C> {
    api: EmployeeApi<C>,
    config: ClientConfig,
    state: AppState,
}

impl<C: HttpClient> EmployeeManager<C> {
    pub fn new(http: C, config: ClientConfig) -> Self {
        Self {
            api: EmployeeApi::new(http, &config),
            config,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn api(&self) -> &EmployeeApi<C> {
        &self.api
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state.apply(action);
    }

    /// 清理到期的提示
    pub fn tick(&mut self) {
        self.dispatch(Action::Tick(Instant::now()));
    }

    /// 启动：健康检查后加载列表，任一失败都显示连接失败横幅
    pub async fn initialize(&mut self) -> ClientResult<()> {
        match self.api.health().await {
            Ok(health) if !health.is_connected() => {
                tracing::warn!(status = %health.status, "Server reports database disconnected");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "Health check failed");
                self.show_persistent_banner(CONNECT_FAILED_BANNER);
                return Err(e);
            }
        }

        if let Err(e) = self.load_employees().await {
            self.show_persistent_banner(CONNECT_FAILED_BANNER);
            return Err(e);
        }
        Ok(())
    }

    /// 加载全部员工
    ///
    /// 仅网络类错误按 [`crate::RetryPolicy`] 线性退避重试；
    /// 最终失败时显示常驻横幅。
    pub async fn load_employees(&mut self) -> ClientResult<()> {
        self.dispatch(Action::SetLoading(true));
        self.dispatch(Action::HideBanner);

        let result = self.fetch_with_retry().await;
        match &result {
            Ok(_) => {}
            Err(e) => {
                tracing::error!(error = %e, "Error loading employees");
                self.show_persistent_banner(format!(
                    "Failed to load employees: {}",
                    e.user_message()
                ));
            }
        }

        self.dispatch(Action::SetLoading(false));
        result.map(|employees| self.dispatch(Action::EmployeesLoaded(employees)))
    }

    async fn fetch_with_retry(&self) -> ClientResult<Vec<Employee>> {
        let retry = self.config.retry;
        let mut attempt = 0;
        loop {
            match self.api.list().await {
                Ok(employees) => return Ok(employees),
                Err(e) if e.is_network() && attempt < retry.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        max = retry.max_retries,
                        error = %e,
                        "Retrying connection"
                    );
                    tokio::time::sleep(retry.delay_for(attempt)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// 提交表单：编辑中则更新，否则新建
    ///
    /// 返回 `Ok(None)` 表示未发出请求 (校验失败或已有提交在途)
    pub async fn submit_form(&mut self) -> ClientResult<Option<Employee>> {
        if self.state.is_submitting {
            return Ok(None);
        }

        let form = match self.state.form.validate() {
            Ok(form) => form,
            Err(errors) => {
                self.dispatch(Action::SetFieldErrors(errors));
                return Ok(None);
            }
        };

        let saved = match self.state.current_employee.as_ref().map(|e| e.id.clone()) {
            Some(id) => self.update_employee(&id, form.into_update()).await?,
            None => self.create_employee(form.into_create()).await?,
        };
        Ok(Some(saved))
    }

    pub async fn create_employee(&mut self, data: EmployeeCreate) -> ClientResult<Employee> {
        self.dispatch(Action::SetSubmitting(true));
        let result = self.api.create(&data).await;
        self.dispatch(Action::SetSubmitting(false));

        match result {
            Ok(employee) => {
                self.dispatch(Action::EmployeeCreated(employee.clone()));
                self.dispatch(Action::CloseModal);
                self.notify(CREATED_MESSAGE);
                Ok(employee)
            }
            Err(e) => {
                self.handle_api_error(&e);
                Err(e)
            }
        }
    }

    pub async fn update_employee(
        &mut self,
        id: &str,
        data: EmployeeUpdate,
    ) -> ClientResult<Employee> {
        self.dispatch(Action::SetSubmitting(true));
        let result = self.api.update(id, &data).await;
        self.dispatch(Action::SetSubmitting(false));

        match result {
            Ok(employee) => {
                self.dispatch(Action::EmployeeUpdated(employee.clone()));
                self.dispatch(Action::CloseModal);
                self.notify(UPDATED_MESSAGE);
                Ok(employee)
            }
            Err(e) => {
                self.handle_api_error(&e);
                Err(e)
            }
        }
    }

    /// 只修改状态 (`PATCH /{id}/status`)
    pub async fn update_status(
        &mut self,
        id: &str,
        status: EmployeeStatus,
    ) -> ClientResult<Employee> {
        self.dispatch(Action::SetSubmitting(true));
        let result = self.api.update_status(id, status).await;
        self.dispatch(Action::SetSubmitting(false));

        match result {
            Ok(employee) => {
                self.dispatch(Action::EmployeeUpdated(employee.clone()));
                self.notify(STATUS_UPDATED_MESSAGE);
                Ok(employee)
            }
            Err(e) => {
                self.show_banner(e.user_message());
                Err(e)
            }
        }
    }

    pub async fn delete_employee(&mut self, id: &str) -> ClientResult<Employee> {
        self.dispatch(Action::SetLoading(true));
        let result = self.api.delete(id).await;
        self.dispatch(Action::SetLoading(false));
        self.dispatch(Action::CloseConfirm);

        match result {
            Ok(employee) => {
                self.dispatch(Action::EmployeeRemoved(employee.id.clone()));
                self.notify(DELETED_MESSAGE);
                Ok(employee)
            }
            Err(e) => {
                self.show_banner(format!("Failed to delete employee: {}", e.user_message()));
                Err(e)
            }
        }
    }

    /// 确认删除弹窗中的目标，没有待确认项时返回 `Ok(None)`
    pub async fn confirm_delete(&mut self) -> ClientResult<Option<Employee>> {
        match self.state.confirm_delete.as_ref().map(|p| p.id.clone()) {
            Some(id) => self.delete_employee(&id).await.map(Some),
            None => Ok(None),
        }
    }

    /// 邮箱冲突显示在邮箱字段上，其余错误显示横幅
    fn handle_api_error(&mut self, err: &ClientError) {
        if err.error_code() == Some(ErrorCode::EmployeeEmailExists) {
            self.dispatch(Action::SetFieldError {
                field: FormField::Email,
                message: EMAIL_TAKEN_MESSAGE.to_string(),
            });
            return;
        }
        self.show_banner(err.user_message());
    }

    fn notify(&mut self, message: &str) {
        let expires_at = Instant::now() + self.config.notification_ttl;
        self.dispatch(Action::Notify {
            message: message.to_string(),
            expires_at,
        });
    }

    fn show_banner(&mut self, message: impl Into<String>) {
        let expires_at = Some(Instant::now() + self.config.banner_ttl);
        self.dispatch(Action::ShowBanner {
            message: message.into(),
            expires_at,
        });
    }

    fn show_persistent_banner(&mut self, message: impl Into<String>) {
        self.dispatch(Action::ShowBanner {
            message: message.into(),
            expires_at: None,
        });
    }
}
