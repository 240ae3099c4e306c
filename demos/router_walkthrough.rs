//! Scripted navigation session against a console toolkit.
//!
//! Run with `cargo run --example router_walkthrough`. Every toolkit call and
//! every router log event prints to stdout, followed by a dump of the final
//! tracked record.

use std::collections::HashMap;
use std::sync::Arc;

use wireframe_mvp::{
    ContainerFactory, ContainerHandle, HandleAllocator, LogEvent, LogSink, Logger, LoggingResult,
    Result, RouterConfig, ScreenHandle, ScreenToolkit, Wireframe,
};

struct StdoutSink;

impl LogSink for StdoutSink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        println!("log  | {}", serde_json::to_string(event)?);
        Ok(())
    }
}

struct ConsoleFactory {
    alloc: Arc<HandleAllocator>,
    children: HashMap<ContainerHandle, Vec<ScreenHandle>>,
}

impl ContainerFactory for ConsoleFactory {
    fn create_container(&mut self, initial: Option<ScreenHandle>) -> Result<ContainerHandle> {
        let container = self.alloc.container();
        match initial {
            Some(screen) => println!("view | created {container} seeded with {screen}"),
            None => println!("view | created empty {container}"),
        }
        Ok(container)
    }

    fn activate_root(&mut self, container: ContainerHandle, animated: bool) -> Result<()> {
        println!("view | {container} installed as window root (animated: {animated})");
        Ok(())
    }

    fn present_container(
        &mut self,
        container: ContainerHandle,
        onto: ScreenHandle,
        animated: bool,
    ) -> Result<()> {
        println!("view | {container} presented over {onto} (animated: {animated})");
        Ok(())
    }

    fn container_children(&self, container: ContainerHandle) -> Vec<ScreenHandle> {
        self.children.get(&container).cloned().unwrap_or_default()
    }
}

struct ConsoleToolkit;

impl ScreenToolkit for ConsoleToolkit {
    fn push(
        &mut self,
        container: ContainerHandle,
        screen: ScreenHandle,
        _animated: bool,
    ) -> Result<()> {
        println!("view | {screen} pushed onto {container}");
        Ok(())
    }

    fn push_as_modal(
        &mut self,
        container: ContainerHandle,
        screen: ScreenHandle,
        _animated: bool,
    ) -> Result<()> {
        println!("view | {screen} pushed modally onto {container}");
        Ok(())
    }

    fn present(&mut self, screen: ScreenHandle, onto: ScreenHandle, _animated: bool) -> Result<()> {
        println!("view | {screen} presented over {onto}");
        Ok(())
    }

    fn pop_one(&mut self, container: ContainerHandle, _animated: bool) -> Result<()> {
        println!("view | {container} popped one screen");
        Ok(())
    }

    fn pop_to_first(&mut self, container: ContainerHandle, _animated: bool) -> Result<()> {
        println!("view | {container} popped to its first screen");
        Ok(())
    }

    fn dismiss(&mut self, screen: ScreenHandle, _animated: bool) -> Result<()> {
        println!("view | {screen} dismissed");
        Ok(())
    }
}

fn main() -> Result<()> {
    let alloc = Arc::new(HandleAllocator::new());

    let settings_container = alloc.container();
    let settings_home = alloc.screen();
    let settings_detail = alloc.screen();
    let mut children = HashMap::new();
    children.insert(settings_container, vec![settings_home, settings_detail]);

    let config = RouterConfig {
        logger: Some(Logger::new(StdoutSink)),
        ..RouterConfig::default()
    };
    let mut wireframe = Wireframe::with_config(
        ConsoleFactory {
            alloc: alloc.clone(),
            children,
        },
        ConsoleToolkit,
        config,
    );

    let home = alloc.screen();
    let list = alloc.screen();
    let detail = alloc.screen();
    let sheet = alloc.screen();

    wireframe.push_root(home, false)?;
    wireframe.push(list, true)?;
    wireframe.push(detail, true)?;
    wireframe.push_modal(sheet, true)?;
    wireframe.pop_modal(true)?;

    // the user swipes back from the detail screen
    wireframe.pop_gesture_completed();

    wireframe.present_modal_container(settings_container, true)?;
    wireframe.dismiss_modal(true)?;

    println!("\nfinal record:");
    for record in wireframe.stack().records() {
        println!("  {record:?}");
    }
    println!(
        "active screen: {:?}, pop depth: {}",
        wireframe.active_screen(),
        wireframe.pop_depth()
    );
    Ok(())
}
