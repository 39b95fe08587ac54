//! 单例缓存

use dashmap::DashMap;
use ioc_common::{BeanError, BeanRef, BeanResult};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use tracing::{debug, warn};

/// 创建锁的持有与等待关系
#[derive(Debug, Default)]
struct WaitGraph {
    // Bean 名称 -> 持有其创建锁的线程
    owners: HashMap<String, ThreadId>,
    // 线程 -> 正在等待的 Bean 名称
    waiting: HashMap<ThreadId, String>,
}

impl WaitGraph {
    /// 沿等待链查找是否回到 `me`，返回形如 `a -> b -> a` 的创建链
    fn find_cycle(&self, name: &str, me: ThreadId) -> Option<String> {
        let mut chain = vec![name];
        let mut current = name;

        for _ in 0..=self.owners.len() {
            let owner = self.owners.get(current)?;
            if *owner == me {
                chain.insert(0, current);
                return Some(chain.join(" -> "));
            }
            current = self.waiting.get(owner).map(String::as_str)?;
            chain.push(current);
        }
        None
    }
}

/// 持有创建锁期间登记的所有者，离开作用域时注销
struct OwnerEntry<'a> {
    graph: &'a Mutex<WaitGraph>,
    name: &'a str,
}

impl<'a> OwnerEntry<'a> {
    fn enter(graph: &'a Mutex<WaitGraph>, name: &'a str, me: ThreadId) -> Self {
        graph.lock().owners.insert(name.to_string(), me);
        Self { graph, name }
    }
}

impl Drop for OwnerEntry<'_> {
    fn drop(&mut self) {
        self.graph.lock().owners.remove(self.name);
    }
}

/// 单例缓存
///
/// 首次创建按名称串行化：同一名称的并发首次请求只有一个执行创建，
/// 其余等待并复用结果。创建失败不会写入缓存。
///
/// 跨线程的循环依赖（线程 1 持有 `a` 等待 `b`，线程 2 持有 `b` 等待 `a`）在等待前检测，
/// 闭合循环的一方得到 `CurrentlyInCreation`，不会阻塞。
#[derive(Debug, Default)]
pub struct SingletonCache {
    instances: DashMap<String, BeanRef>,
    creation_locks: DashMap<String, Arc<Mutex<()>>>,
    wait_graph: Mutex<WaitGraph>,
}

impl SingletonCache {
    /// 创建空缓存
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取已缓存的实例
    pub fn get(&self, name: &str) -> Option<BeanRef> {
        self.instances.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// 获取已缓存的实例，未命中时调用 `create` 创建并缓存
    pub fn get_or_create<F>(&self, name: &str, create: F) -> BeanResult<BeanRef>
    where
        F: FnOnce() -> BeanResult<BeanRef>,
    {
        self.get_or_create_with(name, || create().map(|instance| (instance, true)))
    }

    /// 与 [`get_or_create`](Self::get_or_create) 相同，`create` 额外返回实例是否写入缓存
    pub fn get_or_create_with<F>(&self, name: &str, create: F) -> BeanResult<BeanRef>
    where
        F: FnOnce() -> BeanResult<(BeanRef, bool)>,
    {
        if let Some(instance) = self.get(name) {
            debug!("单例缓存命中: {}", name);
            return Ok(instance);
        }

        self.with_creation_lock(name, || {
            // 等待期间可能已由其他线程创建
            if let Some(instance) = self.get(name) {
                debug!("单例已由其他调用方创建: {}", name);
                return Ok(instance);
            }

            let (instance, cache) = create()?;
            if cache {
                self.instances.insert(name.to_string(), Arc::clone(&instance));
                debug!("单例已缓存: {}", name);
            }
            Ok(instance)
        })
    }

    /// 持有创建锁执行 `replace`，成功后丢弃已缓存的实例
    ///
    /// 正在进行的首次创建会先完成，它的结果随后被丢弃。
    pub fn replace_with<F>(&self, name: &str, replace: F) -> BeanResult<()>
    where
        F: FnOnce() -> BeanResult<()>,
    {
        self.with_creation_lock(name, || {
            replace()?;
            if self.instances.remove(name).is_some() {
                debug!("丢弃被替换的单例: {}", name);
            }
            Ok(())
        })
    }

    /// 移除缓存的实例
    pub fn remove(&self, name: &str) -> Option<BeanRef> {
        self.instances.remove(name).map(|(_, instance)| instance)
    }

    /// 是否已缓存
    pub fn contains(&self, name: &str) -> bool {
        self.instances.contains_key(name)
    }

    /// 已缓存的单例数量
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    fn with_creation_lock<T, F>(&self, name: &str, f: F) -> BeanResult<T>
    where
        F: FnOnce() -> BeanResult<T>,
    {
        let lock = Arc::clone(
            self.creation_locks
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );
        let me = thread::current().id();

        let _held = match lock.try_lock() {
            Some(guard) => guard,
            None => {
                self.register_wait(name, me)?;
                let guard = lock.lock();
                self.wait_graph.lock().waiting.remove(&me);
                guard
            }
        };
        let _owner = OwnerEntry::enter(&self.wait_graph, name, me);

        f()
    }

    /// 登记等待关系，等待会形成循环时返回错误
    fn register_wait(&self, name: &str, me: ThreadId) -> BeanResult<()> {
        let mut graph = self.wait_graph.lock();
        if let Some(chain) = graph.find_cycle(name, me) {
            warn!("检测到跨线程循环创建: {}", chain);
            return Err(BeanError::CurrentlyInCreation {
                name: name.to_string(),
                chain,
            });
        }
        graph.waiting.insert(me, name.to_string());
        Ok(())
    }
}
