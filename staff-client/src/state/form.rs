//! 员工表单与提交前校验

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use shared::models::{Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate, Position, Shift};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const AGE_MESSAGE: &str = "Age must be between 18 and 100";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const SALARY_MESSAGE: &str = "Please enter a valid salary amount";
pub const OPTION_MESSAGE: &str = "Please select a valid option";
pub const EMAIL_TAKEN_MESSAGE: &str = "An employee with this email already exists.";

pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 100;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// 表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Age,
    Position,
    Mobile,
    Email,
    Address,
    Salary,
    Shift,
    Status,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::Name,
        FormField::Age,
        FormField::Position,
        FormField::Mobile,
        FormField::Email,
        FormField::Address,
        FormField::Salary,
        FormField::Shift,
        FormField::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Age => "age",
            FormField::Position => "position",
            FormField::Mobile => "mobile",
            FormField::Email => "email",
            FormField::Address => "address",
            FormField::Salary => "salary",
            FormField::Shift => "shift",
            FormField::Status => "status",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 字段错误，每个字段只保留第一条
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    /// 已有错误时忽略
    pub fn add(&mut self, field: FormField, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// 覆盖写入 (服务端返回的字段错误)
    pub fn set(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// 原始表单输入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub name: String,
    pub age: String,
    pub position: String,
    pub mobile: String,
    pub email: String,
    pub address: String,
    pub salary: String,
    pub shift: String,
    pub status: String,
}

/// 校验通过的表单
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedForm {
    pub name: String,
    pub age: i64,
    pub position: Position,
    pub mobile: String,
    pub email: String,
    pub address: String,
    pub salary: f64,
    pub shift: Shift,
    pub status: EmployeeStatus,
}

impl EmployeeForm {
    /// 编辑时用现有记录填充
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            age: employee.age.to_string(),
            position: employee.position.to_string(),
            mobile: employee.mobile.clone(),
            email: employee.email.clone(),
            address: employee.address.clone(),
            salary: employee.salary.to_string(),
            shift: employee.shift.to_string(),
            status: employee.status.to_string(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Age => &self.age,
            FormField::Position => &self.position,
            FormField::Mobile => &self.mobile,
            FormField::Email => &self.email,
            FormField::Address => &self.address,
            FormField::Salary => &self.salary,
            FormField::Shift => &self.shift,
            FormField::Status => &self.status,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Age => self.age = value,
            FormField::Position => self.position = value,
            FormField::Mobile => self.mobile = value,
            FormField::Email => self.email = value,
            FormField::Address => self.address = value,
            FormField::Salary => self.salary = value,
            FormField::Shift => self.shift = value,
            FormField::Status => self.status = value,
        }
    }

    /// 校验全部字段
    ///
    /// 先查必填，再查格式；任一字段失败则整体失败。
    pub fn validate(&self) -> Result<ValidatedForm, FieldErrors> {
        let mut errors = FieldErrors::default();

        for field in FormField::ALL {
            if self.value(field).trim().is_empty() {
                errors.add(field, REQUIRED_MESSAGE);
            }
        }

        let age = self.age.trim().parse::<i64>().ok();
        if !age.is_some_and(|a| (MIN_AGE..=MAX_AGE).contains(&a)) {
            errors.add(FormField::Age, AGE_MESSAGE);
        }

        let email = self.email.trim();
        if !EMAIL_PATTERN.is_match(email) {
            errors.add(FormField::Email, EMAIL_MESSAGE);
        }

        let salary = self
            .salary
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite() && *s >= 0.0);
        if salary.is_none() {
            errors.add(FormField::Salary, SALARY_MESSAGE);
        }

        let position = parse_choice::<Position>(&self.position);
        if position.is_none() {
            errors.add(FormField::Position, OPTION_MESSAGE);
        }
        let shift = parse_choice::<Shift>(&self.shift);
        if shift.is_none() {
            errors.add(FormField::Shift, OPTION_MESSAGE);
        }
        let status = parse_choice::<EmployeeStatus>(&self.status);
        if status.is_none() {
            errors.add(FormField::Status, OPTION_MESSAGE);
        }

        match (age, salary, position, shift, status) {
            (Some(age), Some(salary), Some(position), Some(shift), Some(status))
                if errors.is_empty() =>
            {
                Ok(ValidatedForm {
                    name: self.name.trim().to_string(),
                    age,
                    position,
                    mobile: self.mobile.trim().to_string(),
                    email: email.to_string(),
                    address: self.address.trim().to_string(),
                    salary,
                    shift,
                    status,
                })
            }
            _ => Err(errors),
        }
    }
}

fn parse_choice<T: std::str::FromStr>(raw: &str) -> Option<T> {
    raw.trim().to_lowercase().parse().ok()
}

impl ValidatedForm {
    pub fn into_create(self) -> EmployeeCreate {
        EmployeeCreate {
            name: self.name,
            age: self.age,
            position: self.position,
            mobile: self.mobile,
            email: self.email,
            address: self.address,
            salary: self.salary,
            employee_id: None,
            hire_date: None,
            status: Some(self.status),
            shift: Some(self.shift),
            emergency_contact: None,
        }
    }

    pub fn into_update(self) -> EmployeeUpdate {
        EmployeeUpdate {
            name: Some(self.name),
            age: Some(self.age),
            position: Some(self.position),
            mobile: Some(self.mobile),
            email: Some(self.email),
            address: Some(self.address),
            salary: Some(self.salary),
            status: Some(self.status),
            shift: Some(self.shift),
            ..Default::default()
        }
    }
}
