//! 渲染用的视图模型

use shared::models::{Employee, EmployeeStatus, Position, Shift};

use super::{AppState, Modal};

pub fn position_icon(position: Position) -> &'static str {
    match position {
        Position::Waiter => "🍽️",
        Position::Chef => "👨‍🍳",
        Position::Manager => "👔",
        Position::Bartender => "🍸",
        Position::Host => "🎩",
        Position::Dishwasher => "🧼",
    }
}

pub fn status_icon(status: EmployeeStatus) -> &'static str {
    match status {
        EmployeeStatus::Active => "✅",
        EmployeeStatus::OnLeave => "🏖️",
        EmployeeStatus::Terminated => "❌",
    }
}

pub fn shift_icon(shift: Shift) -> &'static str {
    match shift {
        Shift::Morning => "🌅",
        Shift::Evening => "🌆",
        Shift::Night => "🌙",
        Shift::Flexible => "🔄",
    }
}

/// `$` + 千分位，最多两位小数 (`2500` -> `$2,500`, `1234.5` -> `$1,234.5`)
pub fn format_salary(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    match fraction {
        0 => format!("{sign}${grouped}"),
        f if f % 10 == 0 => format!("{sign}${grouped}.{}", f / 10),
        f => format!("{sign}${grouped}.{f:02}"),
    }
}

/// 员工卡片
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeCard {
    pub id: String,
    pub name: String,
    /// 没有工号时为 `N/A`
    pub employee_id: String,
    pub email: String,
    pub position: String,
    pub position_icon: &'static str,
    pub status: String,
    pub status_icon: &'static str,
    pub shift: String,
    pub shift_icon: &'static str,
    pub age: String,
    pub mobile: String,
    pub salary: String,
    pub address: String,
}

impl From<&Employee> for EmployeeCard {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id.clone(),
            name: e.name.clone(),
            employee_id: e
                .employee_id
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
            email: e.email.clone(),
            position: e.position.to_string(),
            position_icon: position_icon(e.position),
            status: e.status.to_string(),
            status_icon: status_icon(e.status),
            shift: e.shift.to_string(),
            shift_icon: shift_icon(e.shift),
            age: format!("{} years", e.age),
            mobile: e.mobile.clone(),
            salary: format_salary(e.salary),
            address: e.address.clone(),
        }
    }
}

/// 列表区域
#[derive(Debug, Clone, PartialEq)]
pub enum EmployeeListView {
    /// 过滤后没有记录
    Empty,
    Cards(Vec<EmployeeCard>),
}

impl EmployeeListView {
    pub fn render(state: &AppState) -> Self {
        if state.filtered.is_empty() {
            EmployeeListView::Empty
        } else {
            EmployeeListView::Cards(state.filtered.iter().map(EmployeeCard::from).collect())
        }
    }
}

/// 弹窗标题与按钮文案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub subtitle: String,
    pub submit_label: &'static str,
}

impl ModalView {
    pub fn render(state: &AppState) -> Option<Self> {
        match (&state.modal, &state.current_employee) {
            (Modal::Closed, _) => None,
            (Modal::Edit, Some(employee)) => Some(Self {
                title: "Edit Employee".to_string(),
                subtitle: format!("Update {}'s information", employee.name),
                submit_label: "Update Employee",
            }),
            _ => Some(Self {
                title: "Add New Employee".to_string(),
                subtitle: "Fill in the employee details below".to_string(),
                submit_label: "Save Employee",
            }),
        }
    }
}
