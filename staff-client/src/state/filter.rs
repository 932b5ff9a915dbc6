//! 本地过滤
//!
//! 下拉框 (岗位/状态/班次) 不区分大小写等值匹配，空选择不参与；
//! 搜索词不区分大小写，命中姓名、邮箱、工号、地址任意一项即可。

use shared::models::Employee;

/// 过滤条件 (原样保存界面输入)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub position: String,
    pub status: String,
    pub shift: String,
    pub search: String,
}

impl Filters {
    pub fn is_empty(&self) -> bool {
        [&self.position, &self.status, &self.shift, &self.search]
            .iter()
            .all(|v| v.trim().is_empty())
    }

    /// 记录是否满足全部条件
    pub fn matches(&self, employee: &Employee) -> bool {
        equals_or_unset(&self.position, employee.position.as_str())
            && equals_or_unset(&self.status, employee.status.as_str())
            && equals_or_unset(&self.shift, employee.shift.as_str())
            && self.matches_search(employee)
    }

    fn matches_search(&self, employee: &Employee) -> bool {
        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        let contains = |field: &str| field.to_lowercase().contains(&term);
        contains(&employee.name)
            || contains(&employee.email)
            || employee.employee_id.as_deref().is_some_and(contains)
            || contains(&employee.address)
    }

    /// 按条件过滤，保持原有顺序
    pub fn apply(&self, employees: &[Employee]) -> Vec<Employee> {
        employees
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect()
    }
}

fn equals_or_unset(selected: &str, value: &str) -> bool {
    let selected = selected.trim();
    selected.is_empty() || selected.eq_ignore_ascii_case(value)
}
