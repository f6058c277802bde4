use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use sysinfo::System;

/// Aggregated request counters over the sliding window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestMetrics {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub average_response_time_ms: f64,
    pub max_response_time_ms: u64,
    pub min_response_time_ms: u64,
    pub requests_per_second: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointMetrics {
    pub endpoint: String,
    pub method: String,
    pub metrics: RequestMetrics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub uptime_seconds: u64,
    pub memory_usage_bytes: u64,
    pub total_memory_bytes: u64,
    pub cpu_usage_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub system: SystemMetrics,
    pub endpoints: Vec<EndpointMetrics>,
    pub overall: RequestMetrics,
}

#[derive(Debug, Clone)]
struct Sample {
    at: Instant,
    duration: Duration,
    success: bool,
}

#[derive(Debug)]
struct EndpointSamples {
    method: String,
    samples: Vec<Sample>,
}

/// In-process request and system metrics. Fed by the tracking middleware,
/// read by the metrics handlers.
pub struct MetricsService {
    started_at: Instant,
    endpoints: Arc<Mutex<HashMap<String, EndpointSamples>>>,
    window: Duration,
    system: Arc<Mutex<System>>,
}

impl MetricsService {
    pub fn new() -> Self {
        let mut system = System::new_all();
        system.refresh_all();

        Self {
            started_at: Instant::now(),
            endpoints: Arc::new(Mutex::new(HashMap::new())),
            window: Duration::from_secs(300),
            system: Arc::new(Mutex::new(system)),
        }
    }

    pub fn record_request(&self, endpoint: &str, method: &str, duration: Duration, success: bool) {
        let mut endpoints = self.endpoints.lock().unwrap();
        let entry = endpoints
            .entry(endpoint.to_string())
            .or_insert_with(|| EndpointSamples {
                method: method.to_string(),
                samples: Vec::new(),
            });

        entry.samples.push(Sample {
            at: Instant::now(),
            duration,
            success,
        });

        let cutoff = Instant::now() - self.window;
        entry.samples.retain(|sample| sample.at > cutoff);
    }

    pub fn overall_metrics(&self) -> RequestMetrics {
        let endpoints = self.endpoints.lock().unwrap();
        let samples: Vec<Sample> = endpoints
            .values()
            .flat_map(|e| e.samples.iter().cloned())
            .collect();
        self.aggregate(&samples)
    }

    pub fn report(&self) -> PerformanceReport {
        let endpoints = self.endpoints.lock().unwrap();

        let mut per_endpoint = Vec::new();
        let mut all_samples: Vec<Sample> = Vec::new();

        for (endpoint, entry) in endpoints.iter() {
            per_endpoint.push(EndpointMetrics {
                endpoint: endpoint.clone(),
                method: entry.method.clone(),
                metrics: self.aggregate(&entry.samples),
            });
            all_samples.extend(entry.samples.iter().cloned());
        }

        PerformanceReport {
            timestamp: chrono::Utc::now(),
            system: self.system_metrics(),
            endpoints: per_endpoint,
            overall: self.aggregate(&all_samples),
        }
    }

    pub fn endpoint_count(&self) -> usize {
        self.endpoints.lock().unwrap().len()
    }

    fn system_metrics(&self) -> SystemMetrics {
        let mut system = self.system.lock().unwrap();
        system.refresh_cpu_all();
        system.refresh_memory();

        SystemMetrics {
            uptime_seconds: self.started_at.elapsed().as_secs(),
            memory_usage_bytes: system.used_memory(),
            total_memory_bytes: system.total_memory(),
            cpu_usage_percent: system.global_cpu_usage() as f64,
        }
    }

    fn aggregate(&self, samples: &[Sample]) -> RequestMetrics {
        if samples.is_empty() {
            return RequestMetrics {
                total_requests: 0,
                successful_requests: 0,
                failed_requests: 0,
                average_response_time_ms: 0.0,
                max_response_time_ms: 0,
                min_response_time_ms: 0,
                requests_per_second: 0.0,
            };
        }

        let total_requests = samples.len() as u64;
        let successful_requests = samples.iter().filter(|s| s.success).count() as u64;

        let durations: Vec<u64> = samples
            .iter()
            .map(|s| s.duration.as_millis() as u64)
            .collect();
        let total_ms: u64 = durations.iter().sum();

        RequestMetrics {
            total_requests,
            successful_requests,
            failed_requests: total_requests - successful_requests,
            average_response_time_ms: total_ms as f64 / total_requests as f64,
            max_response_time_ms: durations.iter().max().copied().unwrap_or(0),
            min_response_time_ms: durations.iter().min().copied().unwrap_or(0),
            requests_per_second: total_requests as f64 / self.window.as_secs_f64(),
        }
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}
