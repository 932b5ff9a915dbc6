//! 客户端状态
//!
//! 单向数据流：`EmployeeManager` 负责 I/O，结果以 [`Action`] 形式交给
//! [`AppState::apply`]；状态只在 `apply` 中修改。
//!
//! | 字段 | 说明 |
//! |------|------|
//! | employees | 服务端记录的镜像 |
//! | filtered | 按 `filters` 派生的视图 |
//! | is_loading | 列表加载 / 删除进行中 |
//! | is_submitting | 新建 / 更新进行中 (同时只允许一个) |
//! | current_employee | 编辑中的记录 |

pub mod filter;
pub mod form;
pub mod manager;
pub mod view;

pub use filter::Filters;
pub use form::{EmployeeForm, FieldErrors, FormField, ValidatedForm};
pub use manager::EmployeeManager;
pub use view::{EmployeeCard, EmployeeListView, ModalView};

use shared::models::Employee;
use tokio::time::Instant;

/// 弹窗状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    Create,
    Edit,
}

/// 错误横幅，`expires_at` 为 None 时一直显示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub expires_at: Option<Instant>,
}

/// 成功提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub expires_at: Instant,
}

/// 等待确认的删除
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub name: String,
}

impl PendingDelete {
    pub fn message(&self) -> String {
        format!(
            "Are you sure you want to delete {}? This action cannot be undone.",
            self.name
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLoading(bool),
    SetSubmitting(bool),
    /// 整体替换镜像
    EmployeesLoaded(Vec<Employee>),
    EmployeeCreated(Employee),
    EmployeeUpdated(Employee),
    EmployeeRemoved(String),
    SetFilters(Filters),
    SetSearch(String),
    OpenCreate,
    OpenEdit(Employee),
    CloseModal,
    EditField { field: FormField, value: String },
    SetFieldErrors(FieldErrors),
    SetFieldError { field: FormField, message: String },
    RequestDelete(Employee),
    CloseConfirm,
    /// Escape：关闭所有弹窗
    Dismiss,
    ShowBanner { message: String, expires_at: Option<Instant> },
    HideBanner,
    Notify { message: String, expires_at: Instant },
    /// 清理到期的横幅和提示
    Tick(Instant),
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub employees: Vec<Employee>,
    pub filtered: Vec<Employee>,
    pub filters: Filters,
    pub is_loading: bool,
    pub is_submitting: bool,
    pub current_employee: Option<Employee>,
    pub modal: Modal,
    pub form: EmployeeForm,
    pub field_errors: FieldErrors,
    pub confirm_delete: Option<PendingDelete>,
    pub banner: Option<Banner>,
    pub notifications: Vec<Notification>,
    next_notification_id: u64,
}

impl AppState {
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetLoading(loading) => self.is_loading = loading,
            Action::SetSubmitting(submitting) => self.is_submitting = submitting,
            Action::EmployeesLoaded(employees) => {
                self.employees = employees;
                self.refilter();
            }
            Action::EmployeeCreated(employee) => {
                self.employees.push(employee);
                self.refilter();
            }
            Action::EmployeeUpdated(employee) => {
                if let Some(slot) = self.employees.iter_mut().find(|e| e.id == employee.id) {
                    *slot = employee;
                }
                self.refilter();
            }
            Action::EmployeeRemoved(id) => {
                self.employees.retain(|e| e.id != id);
                self.refilter();
            }
            Action::SetFilters(filters) => {
                self.filters = filters;
                self.refilter();
            }
            Action::SetSearch(search) => {
                self.filters.search = search;
                self.refilter();
            }
            Action::OpenCreate => {
                self.modal = Modal::Create;
                self.current_employee = None;
                self.form = EmployeeForm::default();
                self.field_errors = FieldErrors::default();
            }
            Action::OpenEdit(employee) => {
                self.modal = Modal::Edit;
                self.form = EmployeeForm::from_employee(&employee);
                self.current_employee = Some(employee);
                self.field_errors = FieldErrors::default();
            }
            Action::CloseModal => self.close_modal(),
            Action::EditField { field, value } => {
                self.form.set(field, value);
                self.field_errors.clear(field);
            }
            Action::SetFieldErrors(errors) => self.field_errors = errors,
            Action::SetFieldError { field, message } => self.field_errors.set(field, message),
            Action::RequestDelete(employee) => {
                self.confirm_delete = Some(PendingDelete {
                    id: employee.id,
                    name: employee.name,
                });
            }
            Action::CloseConfirm => self.confirm_delete = None,
            Action::Dismiss => {
                self.close_modal();
                self.confirm_delete = None;
            }
            Action::ShowBanner {
                message,
                expires_at,
            } => self.banner = Some(Banner { message, expires_at }),
            Action::HideBanner => self.banner = None,
            Action::Notify {
                message,
                expires_at,
            } => {
                self.next_notification_id += 1;
                self.notifications.push(Notification {
                    id: self.next_notification_id,
                    message,
                    expires_at,
                });
            }
            Action::Tick(now) => {
                self.notifications.retain(|n| n.expires_at > now);
                if self
                    .banner
                    .as_ref()
                    .and_then(|b| b.expires_at)
                    .is_some_and(|at| at <= now)
                {
                    self.banner = None;
                }
            }
        }
    }

    fn close_modal(&mut self) {
        self.modal = Modal::Closed;
        self.current_employee = None;
        self.field_errors = FieldErrors::default();
    }

    fn refilter(&mut self) {
        self.filtered = self.filters.apply(&self.employees);
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal != Modal::Closed
    }

    pub fn banner_message(&self) -> Option<&str> {
        self.banner.as_ref().map(|b| b.message.as_str())
    }
}
