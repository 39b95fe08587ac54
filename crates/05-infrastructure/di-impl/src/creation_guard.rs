//! 创建中 Bean 的线程本地记录

use ioc_common::{BeanError, BeanResult};
use std::cell::RefCell;

thread_local! {
    // 当前线程上正在创建的 (容器, Bean 名称)，按进入顺序
    static CURRENTLY_IN_CREATION: RefCell<Vec<(usize, String)>> = RefCell::new(Vec::new());
}

/// 创建守卫
///
/// 进入时把 Bean 名称压入当前线程的创建栈，同一容器的同名 Bean 已在栈中时返回
/// `CurrentlyInCreation`；离开作用域时弹出。
pub(crate) struct CreationGuard {
    container: usize,
    name: String,
}

impl CreationGuard {
    pub(crate) fn enter(container: usize, name: &str) -> BeanResult<Self> {
        CURRENTLY_IN_CREATION.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.iter().any(|(c, n)| *c == container && n == name) {
                let mut chain: Vec<&str> = stack
                    .iter()
                    .filter(|(c, _)| *c == container)
                    .map(|(_, n)| n.as_str())
                    .collect();
                chain.push(name);
                return Err(BeanError::CurrentlyInCreation {
                    name: name.to_string(),
                    chain: chain.join(" -> "),
                });
            }

            stack.push((container, name.to_string()));
            Ok(Self {
                container,
                name: name.to_string(),
            })
        })
    }
}

impl Drop for CreationGuard {
    fn drop(&mut self) {
        CURRENTLY_IN_CREATION.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack
                .iter()
                .rposition(|(c, n)| *c == self.container && *n == self.name)
            {
                stack.remove(pos);
            }
        });
    }
}
