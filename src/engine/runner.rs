//! 流式命令执行：通过 sh -c 运行单条命令，逐行转发 stdout，捕获 stderr
//!
//! 一次执行只产生一串按序的输出行事件和一个结束事件；
//! 命令一旦启动就运行到结束，不支持中途取消。

use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

use super::types::{EngineEvent, Operation};

/// 成功结束时的结果消息
pub(crate) const SUCCESS_MESSAGE: &str = "operation succeeded";

/// 在独立线程上执行操作并通过总线广播进度与结果。
/// 占用标志在广播 Finished 之前清除：订阅者收到结束事件时必然可以发起新操作。
pub(crate) fn spawn_operation(
    op: Arc<Operation>,
    bus: broadcast::Sender<EngineEvent>,
    running: Arc<AtomicBool>,
) {
    std::thread::spawn(move || {
        let (success, message) = run_to_completion(&op, &bus);
        op.finish(success, message.clone());
        running.store(false, Ordering::SeqCst);
        let _ = bus.send(EngineEvent::Finished { success, message });
    });
}

/// 阻塞运行命令直到退出，返回 (是否成功, 结果消息)。
/// 退出码 0 视为成功；非 0 时以捕获的 stderr 文本作为失败消息；
/// 无法启动时以错误文本作为失败消息，且不产生任何输出行事件。
fn run_to_completion(op: &Operation, bus: &broadcast::Sender<EngineEvent>) -> (bool, String) {
    let mut child = match Command::new("sh")
        .arg("-c")
        .arg(op.command())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return (false, e.to_string()),
    };

    // stderr 由独立线程整体读入，防止管道写满阻塞子进程
    let stderr = child.stderr.take();
    let stderr_handle = std::thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = stderr {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    });

    // stdout 逐行读取，按到达顺序立即转发，一次只缓冲一行
    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines() {
            let Ok(line) = line else { break };
            op.push_line(line.clone());
            let _ = bus.send(EngineEvent::OutputLine(line));
        }
    }

    let stderr_text = stderr_handle.join().unwrap_or_default();

    match child.wait() {
        Ok(status) if status.success() => (true, SUCCESS_MESSAGE.to_string()),
        Ok(_) => (false, stderr_text.trim_end().to_string()),
        Err(e) => (false, e.to_string()),
    }
}
