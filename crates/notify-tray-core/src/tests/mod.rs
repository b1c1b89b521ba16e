mod notify_icon;
