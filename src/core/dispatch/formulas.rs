//! Special-formula pricing rules
//!
//! Each handler implements one reproducible formula with its default usage
//! assumptions recorded in the returned line item. Confidence is low for
//! usage-dependent services and medium for mostly-fixed-cost ones. All
//! numeric constants here are load-bearing for fixture reproducibility.

use crate::config::HOURS_PER_MONTH;
use crate::core::types::{CloudProvider, Confidence, CostLineItem, ResourceSpec};

/// Resolved inputs shared by every handler
pub(super) struct FormulaCtx<'a> {
    pub resource: &'a ResourceSpec,
    pub region: &'a str,
    pub count: i64,
}

impl FormulaCtx<'_> {
    fn line_item(
        &self,
        service: &str,
        monthly_cost_usd: f64,
        assumptions: Vec<String>,
        confidence: Confidence,
    ) -> CostLineItem {
        CostLineItem {
            cloud: CloudProvider::Aws,
            service: service.to_string(),
            resource_name: self.resource.name.clone(),
            terraform_type: self.resource.terraform_type.clone(),
            region: self.region.to_string(),
            monthly_cost_usd,
            pricing_unit: "month".to_string(),
            assumptions,
            priced: true,
            confidence,
        }
    }

    fn count_f(&self) -> f64 {
        self.count as f64
    }
}

/// Serverless functions: $0.20 per 1M requests beyond the first million,
/// plus $0.0000166667 per GB-second of compute.
pub(super) fn price_lambda(ctx: &FormulaCtx, mut assumptions: Vec<String>) -> CostLineItem {
    let usage = &ctx.resource.usage;
    let requests_per_month = usage.requests_per_month.unwrap_or(1_000_000.0);
    let memory_mb = usage.memory_mb.unwrap_or(128.0);
    let duration_ms = usage.duration_ms.unwrap_or(100.0);

    assumptions.push(format!("Lambda function with {memory_mb} MB memory"));
    assumptions.push(format!("Estimated {requests_per_month} requests/month"));
    assumptions.push(format!("Estimated {duration_ms}ms average duration"));
    assumptions
        .push("Lambda pricing: $0.20 per 1M requests (first 1M free) + compute time".to_string());

    let billable_requests = (requests_per_month - 1_000_000.0).max(0.0);
    let request_cost = (billable_requests / 1_000_000.0) * 0.20;

    let gb_seconds = (memory_mb / 1024.0) * (duration_ms / 1000.0) * requests_per_month;
    let compute_cost = gb_seconds * 0.000_016_666_7;

    let total = (request_cost + compute_cost) * ctx.count_f();
    ctx.line_item("Lambda", total, assumptions, Confidence::Low)
}

/// Object storage: first 50 GB free, $0.023/GB beyond, plus a minimal
/// request cost.
pub(super) fn price_s3(ctx: &FormulaCtx, mut assumptions: Vec<String>) -> CostLineItem {
    let usage = &ctx.resource.usage;
    let storage_gb = usage.storage_gb.unwrap_or(1.0);
    assumptions.push(format!("S3 bucket with estimated {storage_gb} GB storage"));
    assumptions.push("S3 pricing varies by storage class, requests, and data transfer".to_string());
    assumptions.push("This is a minimal estimate - actual costs depend on usage patterns".to_string());

    let storage_cost = if storage_gb > 50.0 {
        ((storage_gb - 50.0) * 0.023).max(0.0)
    } else {
        0.0
    };

    let requests_per_month = usage.requests_per_month.unwrap_or(1_000.0);
    let request_cost = (requests_per_month / 1_000.0) * 0.001;

    let total = (storage_cost + request_cost) * ctx.count_f();
    ctx.line_item("S3", total, assumptions, Confidence::Low)
}

/// NAT gateway: $0.045/hour base plus $0.045 per GB processed.
pub(super) fn price_nat_gateway(ctx: &FormulaCtx, mut assumptions: Vec<String>) -> CostLineItem {
    let mut data_transfer_gb = ctx.resource.usage.data_transfer_gb.unwrap_or(0.0);
    if data_transfer_gb == 0.0 {
        data_transfer_gb = 1.0;
        assumptions.push(
            "Assuming minimal data transfer: 1 GB/month (idle/light usage scenario)".to_string(),
        );
        assumptions.push(
            "This represents outbound internet traffic from private subnets through NAT Gateway"
                .to_string(),
        );
        assumptions.push(
            "Actual costs increase with data transfer volume - estimate for low-traffic scenario"
                .to_string(),
        );
    }

    let hourly_cost = 0.045;
    let monthly_base = hourly_cost * HOURS_PER_MONTH;
    let data_processing_cost = data_transfer_gb * 0.045;
    let total = (monthly_base + data_processing_cost) * ctx.count_f();

    assumptions.push(format!(
        "NAT Gateway installation/base cost: ${hourly_cost:.4}/hour × 730 hours = ${monthly_base:.2}/month"
    ));
    assumptions.push(format!(
        "Data processing charges: {data_transfer_gb} GB × $0.045/GB = ${data_processing_cost:.2}"
    ));
    assumptions.push(
        "Note: Data transfer costs scale with actual usage - this assumes minimal traffic"
            .to_string(),
    );

    ctx.line_item("VPC", total, assumptions, Confidence::Medium)
}

/// Network load balancer: $0.0225/hour base plus NLCU charges.
pub(super) fn price_nlb(ctx: &FormulaCtx, mut assumptions: Vec<String>) -> CostLineItem {
    let mut nlcu_count = ctx.resource.usage.nlcu_count.unwrap_or(1.0);
    if nlcu_count == 0.0 {
        nlcu_count = 1.0;
        assumptions.push(
            "Assuming minimal NLCU usage: 1 NLCU (~1 Gbps, minimal connections)".to_string(),
        );
    }

    let hourly_cost = 0.0225;
    let monthly_base = hourly_cost * HOURS_PER_MONTH;
    let nlcu_hourly_cost = 0.006;
    let nlcu_monthly_cost = nlcu_count * nlcu_hourly_cost * HOURS_PER_MONTH;
    let total = (monthly_base + nlcu_monthly_cost) * ctx.count_f();

    assumptions.push(format!(
        "NLB base cost: ${hourly_cost:.4}/hour × 730 hours = ${monthly_base:.2}/month"
    ));
    assumptions.push(format!(
        "NLCU charges: {nlcu_count} NLCU × ${nlcu_hourly_cost:.3}/NLCU-hour × 730 hours = ${nlcu_monthly_cost:.2}/month"
    ));
    assumptions.push("NLCU factors: processed bytes, active connections".to_string());
    assumptions.push(
        "Note: Actual NLCU costs vary significantly with traffic - this assumes minimal usage"
            .to_string(),
    );

    ctx.line_item("ELB", total, assumptions, Confidence::Low)
}

/// Application load balancer: $0.0225/hour base plus LCU charges.
pub(super) fn price_alb(ctx: &FormulaCtx, mut assumptions: Vec<String>) -> CostLineItem {
    let mut lcu_count = ctx.resource.usage.lcu_count.unwrap_or(1.0);
    if lcu_count == 0.0 {
        lcu_count = 1.0;
        assumptions.push(
            "Assuming minimal LCU usage: 1 LCU (1 user, ~1 Mbps, minimal requests)".to_string(),
        );
    }

    let hourly_cost = 0.0225;
    let monthly_base = hourly_cost * HOURS_PER_MONTH;
    let lcu_hourly_cost = 0.008;
    let lcu_monthly_cost = lcu_count * lcu_hourly_cost * HOURS_PER_MONTH;
    let total = (monthly_base + lcu_monthly_cost) * ctx.count_f();

    assumptions.push(format!(
        "ALB base cost: ${hourly_cost:.4}/hour × 730 hours = ${monthly_base:.2}/month"
    ));
    assumptions.push(format!(
        "LCU charges: {lcu_count} LCU × ${lcu_hourly_cost:.3}/LCU-hour × 730 hours = ${lcu_monthly_cost:.2}/month"
    ));
    assumptions.push(
        "LCU factors: new connections, active connections, processed bytes, rule evaluations"
            .to_string(),
    );
    assumptions.push(
        "Note: Actual LCU costs vary significantly with traffic - this assumes minimal usage"
            .to_string(),
    );

    ctx.line_item("ELB", total, assumptions, Confidence::Low)
}

/// Interface VPC endpoint: $0.01/hour base plus $0.01 per GB processed.
/// Gateway endpoints are free and never reach this handler.
pub(super) fn price_vpc_endpoint(ctx: &FormulaCtx, mut assumptions: Vec<String>) -> CostLineItem {
    let mut data_transfer_gb = ctx.resource.usage.data_transfer_gb.unwrap_or(0.0);
    if data_transfer_gb == 0.0 {
        data_transfer_gb = 1.0;
        assumptions.push("Assuming minimal data transfer: 1 GB/month (idle/light usage)".to_string());
    }

    let hourly_cost = 0.01;
    let monthly_base = hourly_cost * HOURS_PER_MONTH;
    let data_processing_cost = data_transfer_gb * 0.01;
    let total = (monthly_base + data_processing_cost) * ctx.count_f();

    assumptions.push(format!(
        "VPC Interface Endpoint base cost: ${hourly_cost:.4}/hour × 730 hours = ${monthly_base:.2}/month"
    ));
    assumptions.push(format!(
        "Data processing: {data_transfer_gb} GB × $0.01/GB = ${data_processing_cost:.2}"
    ));
    assumptions.push(
        "Note: Gateway endpoints (S3, DynamoDB) are free - this is for Interface endpoints"
            .to_string(),
    );
    assumptions.push(
        "Actual costs depend on data transfer volume - this assumes minimal traffic".to_string(),
    );

    ctx.line_item("VPC", total, assumptions, Confidence::Medium)
}

/// Block storage: per-GB rate by volume type, plus an IOPS charge for
/// provisioned-IOPS volumes.
pub(super) fn price_ebs_volume(ctx: &FormulaCtx, mut assumptions: Vec<String>) -> CostLineItem {
    let volume_type = ctx.resource.size.volume_type_or_default().to_lowercase();
    let mut size_gb = ctx.resource.usage.storage_gb.unwrap_or(20.0);
    if size_gb == 0.0 {
        size_gb = 20.0;
        assumptions.push("Assuming default volume size: 20 GB (actual size may vary)".to_string());
    }

    let price_per_gb = match volume_type.as_str() {
        "gp3" => 0.08,
        "gp2" => 0.10,
        "io1" | "io2" => 0.125,
        "st1" => 0.045,
        "sc1" => 0.015,
        _ => 0.08,
    };
    let monthly_storage_cost = size_gb * price_per_gb;

    let mut iops_cost = 0.0;
    if volume_type == "io1" || volume_type == "io2" {
        let mut provisioned_iops = ctx.resource.usage.iops.unwrap_or(3_000.0);
        if provisioned_iops == 0.0 {
            provisioned_iops = 3_000.0;
            assumptions.push("Assuming default provisioned IOPS: 3000 IOPS".to_string());
        }
        iops_cost = provisioned_iops * 0.065 / 1_000.0;
        assumptions.push(format!(
            "Provisioned IOPS: {provisioned_iops} × $0.065/1000 IOPS = ${iops_cost:.2}/month"
        ));
    }

    let total = (monthly_storage_cost + iops_cost) * ctx.count_f();

    assumptions.push(format!("EBS Volume type: {}", volume_type.to_uppercase()));
    assumptions.push(format!(
        "Storage: {size_gb} GB × ${price_per_gb:.3}/GB = ${monthly_storage_cost:.2}/month"
    ));
    assumptions.push(
        "Note: Actual costs depend on volume size and IOPS configuration".to_string(),
    );

    ctx.line_item("EBS", total, assumptions, Confidence::Medium)
}

/// Elastic file storage: per-GB rate by performance tier, plus an optional
/// provisioned-throughput charge.
pub(super) fn price_efs(ctx: &FormulaCtx, mut assumptions: Vec<String>) -> CostLineItem {
    let performance_mode = ctx.resource.size.performance_mode_or_default().to_string();
    let mut storage_gb = ctx.resource.usage.storage_gb.unwrap_or(10.0);
    if storage_gb == 0.0 {
        storage_gb = 10.0;
        assumptions.push("Assuming default storage: 10 GB (actual usage may vary)".to_string());
    }

    let price_per_gb = if performance_mode.to_lowercase().contains("onezone") {
        0.16
    } else {
        0.30
    };
    let monthly_storage_cost = storage_gb * price_per_gb;

    let mut throughput_cost = 0.0;
    let provisioned_throughput = ctx.resource.usage.provisioned_throughput_mbps.unwrap_or(0.0);
    if provisioned_throughput > 0.0 {
        throughput_cost = provisioned_throughput * 0.05 * HOURS_PER_MONTH;
        assumptions.push(format!(
            "Provisioned throughput: {provisioned_throughput} MB/s × $0.05/MB/s-hour × 730 hours = ${throughput_cost:.2}/month"
        ));
    }

    let total = (monthly_storage_cost + throughput_cost) * ctx.count_f();

    assumptions.push(format!("EFS Performance Mode: {performance_mode}"));
    assumptions.push(format!(
        "Storage: {storage_gb} GB × ${price_per_gb:.3}/GB = ${monthly_storage_cost:.2}/month"
    ));
    assumptions.push(
        "Note: Actual costs depend on storage usage and throughput - this assumes minimal usage"
            .to_string(),
    );

    ctx.line_item("EFS", total, assumptions, Confidence::Low)
}

/// REST API gateway: first 1M requests free, then $3.50 per million.
pub(super) fn price_api_gateway(ctx: &FormulaCtx, mut assumptions: Vec<String>) -> CostLineItem {
    let mut requests_per_month = ctx.resource.usage.requests_per_month.unwrap_or(100_000.0);
    if requests_per_month == 0.0 {
        requests_per_month = 100_000.0;
        assumptions.push(
            "Assuming minimal API usage: 100,000 requests/month (within free tier)".to_string(),
        );
    }

    let free_tier_requests = 1_000_000.0;
    let billable_requests = (requests_per_month - free_tier_requests).max(0.0);
    let request_cost = (billable_requests / 1_000_000.0) * 3.50;
    let total = request_cost * ctx.count_f();

    if requests_per_month <= free_tier_requests {
        assumptions.push(format!(
            "API Gateway requests: {requests_per_month} requests/month (within free tier - $0)"
        ));
        assumptions.push("Free tier: First 1M requests/month are free".to_string());
    } else {
        assumptions.push(format!(
            "API Gateway requests: {requests_per_month} requests/month"
        ));
        assumptions.push(format!(
            "Billable requests: {billable_requests} × $3.50/1M = ${request_cost:.2}/month"
        ));
    }
    assumptions.push(
        "Note: Additional costs for caching, custom domains, and data transfer may apply"
            .to_string(),
    );

    ctx.line_item("API Gateway", total, assumptions, Confidence::Low)
}

/// CDN distribution: per-GB transfer plus per-10K-request charge.
pub(super) fn price_cloudfront(ctx: &FormulaCtx, mut assumptions: Vec<String>) -> CostLineItem {
    let usage = &ctx.resource.usage;
    let mut data_transfer_gb = usage.data_transfer_gb.unwrap_or(10.0);
    if data_transfer_gb == 0.0 {
        data_transfer_gb = 10.0;
        assumptions
            .push("Assuming minimal data transfer: 10 GB/month (idle/light usage)".to_string());
    }
    let mut requests_per_month = usage.requests_per_month.unwrap_or(10_000.0);
    if requests_per_month == 0.0 {
        requests_per_month = 10_000.0;
        assumptions.push("Assuming minimal requests: 10,000 requests/month".to_string());
    }

    let data_transfer_cost = data_transfer_gb * 0.085;
    let request_cost = (requests_per_month / 10_000.0) * 0.0075;
    let total = (data_transfer_cost + request_cost) * ctx.count_f();

    assumptions.push(format!(
        "CloudFront data transfer: {data_transfer_gb} GB × $0.085/GB = ${data_transfer_cost:.2}/month"
    ));
    assumptions.push(format!(
        "CloudFront requests: {requests_per_month} requests × $0.0075/10K = ${request_cost:.2}/month"
    ));
    assumptions.push(
        "Note: CloudFront pricing varies by region and data transfer volume - this assumes minimal usage"
            .to_string(),
    );

    ctx.line_item("CloudFront", total, assumptions, Confidence::Low)
}

/// Transit gateway: $0.05/hour base plus $0.02 per GB processed.
pub(super) fn price_transit_gateway(
    ctx: &FormulaCtx,
    mut assumptions: Vec<String>,
) -> CostLineItem {
    let mut data_transfer_gb = ctx.resource.usage.data_transfer_gb.unwrap_or(0.0);
    if data_transfer_gb == 0.0 {
        data_transfer_gb = 1.0;
        assumptions.push("Assuming minimal data transfer: 1 GB/month (idle/light usage)".to_string());
    }

    let hourly_cost = 0.05;
    let monthly_base = hourly_cost * HOURS_PER_MONTH;
    let data_processing_cost = data_transfer_gb * 0.02;
    let total = (monthly_base + data_processing_cost) * ctx.count_f();

    assumptions.push(format!(
        "Transit Gateway base cost: ${hourly_cost:.4}/hour × 730 hours = ${monthly_base:.2}/month"
    ));
    assumptions.push(format!(
        "Data processing: {data_transfer_gb} GB × $0.02/GB = ${data_processing_cost:.2}"
    ));
    assumptions.push(
        "Note: Actual costs depend on data transfer volume - this assumes minimal traffic"
            .to_string(),
    );

    ctx.line_item("VPC", total, assumptions, Confidence::Medium)
}

/// Container tasks on serverless compute: per-vCPU-hour plus per-GB-hour,
/// scaled by task count and declared runtime hours.
pub(super) fn price_fargate_service(
    ctx: &FormulaCtx,
    mut assumptions: Vec<String>,
) -> CostLineItem {
    let usage = &ctx.resource.usage;
    let mut vcpu = usage.vcpu.unwrap_or(0.25);
    if vcpu == 0.0 {
        vcpu = 0.25;
        assumptions.push("Assuming minimal vCPU: 0.25 vCPU (minimal task configuration)".to_string());
    }
    let mut memory_gb = usage.memory_gb.unwrap_or(0.5);
    if memory_gb == 0.0 {
        memory_gb = 0.5;
        assumptions.push("Assuming minimal memory: 0.5 GB (minimal task configuration)".to_string());
    }

    let task_count = if ctx.count > 0 { ctx.count_f() } else { 1.0 };
    let hours_per_month = usage.hours_per_month_or(HOURS_PER_MONTH);

    let vcpu_cost = vcpu * 0.04048 * hours_per_month * task_count;
    let memory_cost = memory_gb * 0.004445 * hours_per_month * task_count;
    let total = vcpu_cost + memory_cost;

    assumptions.push(format!(
        "Fargate task configuration: {vcpu} vCPU, {memory_gb} GB memory"
    ));
    assumptions.push(format!("Task count: {task_count}"));
    assumptions.push(format!(
        "vCPU cost: {vcpu} × $0.04048/vCPU-hour × {hours_per_month} hours × {task_count} tasks = ${vcpu_cost:.2}/month"
    ));
    assumptions.push(format!(
        "Memory cost: {memory_gb} GB × $0.004445/GB-hour × {hours_per_month} hours × {task_count} tasks = ${memory_cost:.2}/month"
    ));
    assumptions.push(
        "Note: Actual costs depend on task count and runtime - this assumes minimal configuration"
            .to_string(),
    );

    ctx.line_item("ECS", total, assumptions, Confidence::Low)
}

/// ECS service without Fargate: the service object itself is free; cost
/// comes from the underlying capacity.
pub(super) fn price_ecs_service_free(
    ctx: &FormulaCtx,
    mut assumptions: Vec<String>,
) -> CostLineItem {
    assumptions.push("Free - ECS services have no charge (pay for tasks)".to_string());
    ctx.line_item("ECS", 0.0, assumptions, Confidence::High)
}

/// Pub/sub topic: first 1M messages free, then $0.50 per million.
pub(super) fn price_sns_topic(ctx: &FormulaCtx, mut assumptions: Vec<String>) -> CostLineItem {
    let mut messages_per_month = ctx.resource.usage.messages_per_month.unwrap_or(100_000.0);
    if messages_per_month == 0.0 {
        messages_per_month = 100_000.0;
        assumptions
            .push("Assuming minimal SNS messages: 100,000/month (within free tier)".to_string());
    }

    let free_tier_messages = 1_000_000.0;
    let billable_messages = (messages_per_month - free_tier_messages).max(0.0);
    let message_cost = (billable_messages / 1_000_000.0) * 0.50;
    let total = message_cost * ctx.count_f();

    if messages_per_month <= free_tier_messages {
        assumptions.push(format!(
            "SNS messages: {messages_per_month}/month (within free tier - $0)"
        ));
        assumptions.push("Free tier: First 1M messages/month are free".to_string());
    } else {
        assumptions.push(format!("SNS messages: {messages_per_month}/month"));
        assumptions.push(format!(
            "Billable messages: {billable_messages} × $0.50/1M = ${message_cost:.2}/month"
        ));
    }
    assumptions.push(
        "Note: Additional costs for SMS, email delivery, and data transfer may apply".to_string(),
    );

    ctx.line_item("SNS", total, assumptions, Confidence::Low)
}

/// Queue: first 1M requests free, then $0.40 per million.
pub(super) fn price_sqs_queue(ctx: &FormulaCtx, mut assumptions: Vec<String>) -> CostLineItem {
    let mut requests_per_month = ctx.resource.usage.requests_per_month.unwrap_or(100_000.0);
    if requests_per_month == 0.0 {
        requests_per_month = 100_000.0;
        assumptions
            .push("Assuming minimal SQS requests: 100,000/month (within free tier)".to_string());
    }

    let free_tier_requests = 1_000_000.0;
    let billable_requests = (requests_per_month - free_tier_requests).max(0.0);
    let request_cost = (billable_requests / 1_000_000.0) * 0.40;
    let total = request_cost * ctx.count_f();

    if requests_per_month <= free_tier_requests {
        assumptions.push(format!(
            "SQS requests: {requests_per_month}/month (within free tier - $0)"
        ));
        assumptions.push("Free tier: First 1M requests/month are free".to_string());
    } else {
        assumptions.push(format!("SQS requests: {requests_per_month}/month"));
        assumptions.push(format!(
            "Billable requests: {billable_requests} × $0.40/1M = ${request_cost:.2}/month"
        ));
    }
    assumptions.push(
        "Note: Additional costs for data transfer and FIFO queues may apply".to_string(),
    );

    ctx.line_item("SQS", total, assumptions, Confidence::Low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ResourceSpec;

    fn resource(terraform_type: &str) -> ResourceSpec {
        ResourceSpec {
            terraform_type: terraform_type.to_string(),
            name: "test".to_string(),
            ..ResourceSpec::default()
        }
    }

    fn ctx<'a>(resource: &'a ResourceSpec, count: i64) -> FormulaCtx<'a> {
        FormulaCtx {
            resource,
            region: "us-east-1",
            count,
        }
    }

    #[test]
    fn test_lambda_defaults() {
        let resource = resource("aws_lambda_function");
        let item = price_lambda(&ctx(&resource, 1), Vec::new());
        // 1M requests fit in the free tier; compute is
        // 0.125 GB * 0.1 s * 1M = 12_500 GB-seconds at $0.0000166667
        let expected = 12_500.0 * 0.000_016_666_7;
        assert!((item.monthly_cost_usd - expected).abs() < 1e-9);
        assert_eq!(item.confidence, Confidence::Low);
        assert!(item
            .assumptions
            .iter()
            .any(|a| a.contains("first 1M free")));
    }

    #[test]
    fn test_lambda_billable_requests() {
        let mut resource = resource("aws_lambda_function");
        resource.usage.requests_per_month = Some(3_000_000.0);
        let item = price_lambda(&ctx(&resource, 1), Vec::new());
        let request_cost = 2.0 * 0.20;
        let compute_cost = 0.125 * 0.1 * 3_000_000.0 * 0.000_016_666_7;
        assert!((item.monthly_cost_usd - (request_cost + compute_cost)).abs() < 1e-9);
    }

    #[test]
    fn test_s3_defaults_are_nearly_free() {
        let resource = resource("aws_s3_bucket");
        let item = price_s3(&ctx(&resource, 1), Vec::new());
        // 1 GB is inside the free allowance; 1000 requests cost $0.001
        assert!((item.monthly_cost_usd - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_s3_storage_beyond_allowance() {
        let mut resource = resource("aws_s3_bucket");
        resource.usage.storage_gb = Some(150.0);
        let item = price_s3(&ctx(&resource, 1), Vec::new());
        let expected = (150.0 - 50.0) * 0.023 + 0.001;
        assert!((item.monthly_cost_usd - expected).abs() < 1e-9);
    }

    #[test]
    fn test_nat_gateway_base_plus_data() {
        let resource = resource("aws_nat_gateway");
        let item = price_nat_gateway(&ctx(&resource, 1), Vec::new());
        let expected = 0.045 * 730.0 + 1.0 * 0.045;
        assert!((item.monthly_cost_usd - expected).abs() < 1e-9);
        assert_eq!(item.service, "VPC");
        assert_eq!(item.confidence, Confidence::Medium);
    }

    #[test]
    fn test_nat_gateway_scales_with_count() {
        let resource = resource("aws_nat_gateway");
        let single = price_nat_gateway(&ctx(&resource, 1), Vec::new());
        let triple = price_nat_gateway(&ctx(&resource, 3), Vec::new());
        assert!((triple.monthly_cost_usd - 3.0 * single.monthly_cost_usd).abs() < 1e-9);
    }

    #[test]
    fn test_alb_and_nlb_rates_differ() {
        let resource = resource("aws_lb");
        let alb = price_alb(&ctx(&resource, 1), Vec::new());
        let nlb = price_nlb(&ctx(&resource, 1), Vec::new());
        let alb_expected = 0.0225 * 730.0 + 1.0 * 0.008 * 730.0;
        let nlb_expected = 0.0225 * 730.0 + 1.0 * 0.006 * 730.0;
        assert!((alb.monthly_cost_usd - alb_expected).abs() < 1e-9);
        assert!((nlb.monthly_cost_usd - nlb_expected).abs() < 1e-9);
        assert_eq!(alb.service, "ELB");
    }

    #[test]
    fn test_vpc_endpoint() {
        let resource = resource("aws_vpc_endpoint");
        let item = price_vpc_endpoint(&ctx(&resource, 1), Vec::new());
        let expected = 0.01 * 730.0 + 1.0 * 0.01;
        assert!((item.monthly_cost_usd - expected).abs() < 1e-9);
    }

    #[test]
    fn test_ebs_gp3_default_size() {
        let resource = resource("aws_ebs_volume");
        let item = price_ebs_volume(&ctx(&resource, 1), Vec::new());
        assert!((item.monthly_cost_usd - 20.0 * 0.08).abs() < 1e-9);
        assert!(item.assumptions.iter().any(|a| a.contains("GP3")));
    }

    #[test]
    fn test_ebs_provisioned_iops_charges() {
        let mut resource = resource("aws_ebs_volume");
        resource.size.volume_type = Some("io2".to_string());
        resource.usage.storage_gb = Some(100.0);
        resource.usage.iops = Some(5_000.0);
        let item = price_ebs_volume(&ctx(&resource, 1), Vec::new());
        let expected = 100.0 * 0.125 + 5_000.0 * 0.065 / 1_000.0;
        assert!((item.monthly_cost_usd - expected).abs() < 1e-9);
    }

    #[test]
    fn test_efs_one_zone_rate() {
        let mut resource = resource("aws_efs_file_system");
        resource.size.performance_mode = Some("oneZone".to_string());
        resource.usage.storage_gb = Some(100.0);
        let item = price_efs(&ctx(&resource, 1), Vec::new());
        assert!((item.monthly_cost_usd - 100.0 * 0.16).abs() < 1e-9);
    }

    #[test]
    fn test_efs_provisioned_throughput() {
        let mut resource = resource("aws_efs_file_system");
        resource.usage.provisioned_throughput_mbps = Some(10.0);
        let item = price_efs(&ctx(&resource, 1), Vec::new());
        let expected = 10.0 * 0.30 + 10.0 * 0.05 * 730.0;
        assert!((item.monthly_cost_usd - expected).abs() < 1e-9);
    }

    #[test]
    fn test_api_gateway_within_free_tier_is_zero() {
        let resource = resource("aws_api_gateway_rest_api");
        let item = price_api_gateway(&ctx(&resource, 1), Vec::new());
        assert_eq!(item.monthly_cost_usd, 0.0);
        assert!(item.assumptions.iter().any(|a| a.contains("free tier")));
    }

    #[test]
    fn test_api_gateway_beyond_free_tier() {
        let mut resource = resource("aws_api_gateway_rest_api");
        resource.usage.requests_per_month = Some(5_000_000.0);
        let item = price_api_gateway(&ctx(&resource, 1), Vec::new());
        assert!((item.monthly_cost_usd - 4.0 * 3.50).abs() < 1e-9);
    }

    #[test]
    fn test_cloudfront_defaults() {
        let resource = resource("aws_cloudfront_distribution");
        let item = price_cloudfront(&ctx(&resource, 1), Vec::new());
        let expected = 10.0 * 0.085 + 1.0 * 0.0075;
        assert!((item.monthly_cost_usd - expected).abs() < 1e-9);
    }

    #[test]
    fn test_transit_gateway() {
        let resource = resource("aws_ec2_transit_gateway");
        let item = price_transit_gateway(&ctx(&resource, 1), Vec::new());
        let expected = 0.05 * 730.0 + 1.0 * 0.02;
        assert!((item.monthly_cost_usd - expected).abs() < 1e-9);
    }

    #[test]
    fn test_fargate_minimal_task() {
        let resource = resource("aws_ecs_service");
        let item = price_fargate_service(&ctx(&resource, 1), Vec::new());
        let expected = 0.25 * 0.04048 * 730.0 + 0.5 * 0.004445 * 730.0;
        assert!((item.monthly_cost_usd - expected).abs() < 1e-9);
    }

    #[test]
    fn test_fargate_zero_count_prices_one_task() {
        let resource = resource("aws_ecs_service");
        let zero = price_fargate_service(&ctx(&resource, 0), Vec::new());
        let one = price_fargate_service(&ctx(&resource, 1), Vec::new());
        assert_eq!(zero.monthly_cost_usd, one.monthly_cost_usd);
    }

    #[test]
    fn test_non_fargate_ecs_service_is_free() {
        let resource = resource("aws_ecs_service");
        let item = price_ecs_service_free(&ctx(&resource, 1), Vec::new());
        assert_eq!(item.monthly_cost_usd, 0.0);
        assert_eq!(item.confidence, Confidence::High);
    }

    #[test]
    fn test_sns_and_sqs_free_tier() {
        let sns = price_sns_topic(&ctx(&resource("aws_sns_topic"), 1), Vec::new());
        assert_eq!(sns.monthly_cost_usd, 0.0);

        let sqs = price_sqs_queue(&ctx(&resource("aws_sqs_queue"), 1), Vec::new());
        assert_eq!(sqs.monthly_cost_usd, 0.0);
    }

    #[test]
    fn test_sns_beyond_free_tier() {
        let mut r = resource("aws_sns_topic");
        r.usage.messages_per_month = Some(3_000_000.0);
        let item = price_sns_topic(&ctx(&r, 1), Vec::new());
        assert!((item.monthly_cost_usd - 2.0 * 0.50).abs() < 1e-9);
    }

    #[test]
    fn test_sqs_beyond_free_tier() {
        let mut r = resource("aws_sqs_queue");
        r.usage.requests_per_month = Some(2_000_000.0);
        let item = price_sqs_queue(&ctx(&r, 1), Vec::new());
        assert!((item.monthly_cost_usd - 1.0 * 0.40).abs() < 1e-9);
    }

    #[test]
    fn test_no_formula_ever_prices_negative() {
        let items = vec![
            price_lambda(&ctx(&resource("aws_lambda_function"), 1), Vec::new()),
            price_s3(&ctx(&resource("aws_s3_bucket"), 1), Vec::new()),
            price_nat_gateway(&ctx(&resource("aws_nat_gateway"), 1), Vec::new()),
            price_alb(&ctx(&resource("aws_lb"), 1), Vec::new()),
            price_ebs_volume(&ctx(&resource("aws_ebs_volume"), 1), Vec::new()),
            price_sns_topic(&ctx(&resource("aws_sns_topic"), 1), Vec::new()),
        ];
        for item in items {
            assert!(item.monthly_cost_usd >= 0.0);
        }
    }
}
